//! IEC 61883-1 Common Isochronous Packet decoding.

pub mod error;
pub mod format;
pub mod header;
pub mod isoch;

pub use error::CipError;
pub use format::{DvFdf, DvStype, Format};
pub use header::{CipHeader, CipPacket, SourcePackets, CIP_HEADER_SIZE, MAX_SOURCE_PACKETS};
pub use isoch::IsochHeader;

/// Decodes one isochronous payload. See [`CipPacket::parse`].
pub fn parse(payload: &[u8]) -> Result<CipPacket<'_>, CipError> {
    CipPacket::parse(payload)
}
