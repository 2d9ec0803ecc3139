/// Isochronous packet header quadlet as delivered alongside each payload.
///
/// Bits | Name
/// ---- | ----
/// 16   | data_length
/// 2    | tag
/// 6    | channel
/// 4    | tcode
/// 4    | sy
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct IsochHeader {
    pub data_length: u16,
    pub tag: u8,
    pub channel: u8,
    pub tcode: u8,
    pub sy: u8,
}

/// Tag value announcing a CIP header at the start of the payload.
pub const TAG_CIP: u8 = 0x01;

/// Transaction code of isochronous data blocks.
pub const TCODE_ISOCH_BLOCK: u8 = 0x0A;

impl IsochHeader {
    #[inline(always)]
    pub fn is_cip(&self) -> bool {
        self.tag == TAG_CIP
    }
}

impl From<u32> for IsochHeader {
    fn from(word: u32) -> Self {
        IsochHeader {
            data_length: (word >> 16) as u16,
            tag: ((word >> 14) & 0x03) as u8,
            channel: ((word >> 8) & 0x3F) as u8,
            tcode: ((word >> 4) & 0x0F) as u8,
            sy: (word & 0x0F) as u8,
        }
    }
}

impl From<IsochHeader> for u32 {
    fn from(h: IsochHeader) -> u32 {
        (u32::from(h.data_length) << 16)
            | (u32::from(h.tag & 0x03) << 14)
            | (u32::from(h.channel & 0x3F) << 8)
            | (u32::from(h.tcode & 0x0F) << 4)
            | u32::from(h.sy & 0x0F)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_header_word() {
        let header = IsochHeader::from(0x01E8_7FA0);

        assert_eq!(header.data_length, 0x01E8);
        assert_eq!(header.tag, 1);
        assert_eq!(header.channel, 0x3F);
        assert_eq!(header.tcode, TCODE_ISOCH_BLOCK);
        assert_eq!(header.sy, 0);
        assert!(header.is_cip());
        assert_eq!(u32::from(header), 0x01E8_7FA0);
    }
}
