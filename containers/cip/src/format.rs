/// IEC 61883-1 FMT codes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Format {
    Dv,
    Am824,
    Mpeg2Ts,
    Other(u8),
}

impl Format {
    /// FMT values with the high bit of the 6-bit field set carry a 24-bit FDF
    /// and no SYT field.
    #[inline(always)]
    pub fn has_wide_fdf(self) -> bool {
        u8::from(self) & 0x20 != 0
    }
}

impl From<u8> for Format {
    fn from(d: u8) -> Self {
        match d & 0x3F {
            0x00 => Format::Dv,
            0x10 => Format::Am824,
            0x20 => Format::Mpeg2Ts,
            other => Format::Other(other),
        }
    }
}

impl From<Format> for u8 {
    fn from(fmt: Format) -> u8 {
        match fmt {
            Format::Dv => 0x00,
            Format::Am824 => 0x10,
            Format::Mpeg2Ts => 0x20,
            Format::Other(d) => d,
        }
    }
}

/// Signal type carried in the DV FDF (IEC 61883-5).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DvStype {
    Sd,
    Sdl,
    Hd,
    DvCpro50,
    DvCpro25,
    Unknown(u8),
}

impl From<u8> for DvStype {
    fn from(d: u8) -> Self {
        match d & 0x1F {
            0x00 => DvStype::Sd,
            0x01 => DvStype::Sdl,
            0x02 => DvStype::Hd,
            0x1D => DvStype::DvCpro50,
            0x1E => DvStype::DvCpro25,
            other => DvStype::Unknown(other),
        }
    }
}

// Bits | Name
// ---- | ----
// 1    | 50/60 (1 = 625-50 system)
// 5    | STYPE
// 2    | reserved
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DvFdf {
    pub fifty: bool,
    pub stype: DvStype,
}

impl From<u8> for DvFdf {
    fn from(fdf: u8) -> Self {
        DvFdf {
            fifty: fdf & 0x80 != 0,
            stype: DvStype::from((fdf >> 2) & 0x1F),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fmt_codes() {
        assert_eq!(Format::from(0x00), Format::Dv);
        assert_eq!(Format::from(0x20), Format::Mpeg2Ts);
        assert_eq!(Format::from(0x3F), Format::Other(0x3F));
        assert!(Format::Mpeg2Ts.has_wide_fdf());
        assert!(!Format::Dv.has_wide_fdf());
        assert!(!Format::Am824.has_wide_fdf());
    }

    #[test]
    fn dv_fdf_signal_types() {
        assert_eq!(DvFdf::from(0x80), DvFdf { fifty: true, stype: DvStype::Sd });
        assert_eq!(DvFdf::from(0x04), DvFdf { fifty: false, stype: DvStype::Sdl });
        assert_eq!(DvFdf::from(0x88), DvFdf { fifty: true, stype: DvStype::Hd });
        assert_eq!(DvFdf::from(0xF8), DvFdf { fifty: true, stype: DvStype::DvCpro25 });
        assert_eq!(DvFdf::from(0x74), DvFdf { fifty: false, stype: DvStype::DvCpro50 });
    }
}
