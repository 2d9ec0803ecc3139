use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CipError {
    #[error("bad argument: {0}")]
    BadArgument(&'static str),

    #[error("bad argument: {payload_len} byte payload does not hold {count} source packets of {size} bytes")]
    LayoutOverflow {
        payload_len: usize,
        size: usize,
        count: usize,
    },
}

