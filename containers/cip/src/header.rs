use std::io::Write;

use byteorder::{BigEndian, WriteBytesExt};
use bytesio::bit_reader::BitReader;

use crate::{
    error::CipError,
    format::{DvFdf, Format},
};

pub const CIP_HEADER_SIZE: usize = 8;

/// Upper bound on source packets in one bus packet. Anything larger is a
/// corrupt DBS/FN rather than a real stream.
pub const MAX_SOURCE_PACKETS: usize = 32;

const SOURCE_PACKET_HEADER_SIZE: usize = 4;

// Quadlet 0
// Bits | Name
// ---- | ----
// 2    | EOH=0, Form=0
// 6    | SID
// 8    | DBS (quadlets per data block, 0 = 256)
// 2    | FN (2^FN data blocks per source packet)
// 3    | QPC
// 1    | SPH
// 2    | reserved
// 8    | DBC
//
// Quadlet 1
// 2    | EOH=1, Form=0
// 6    | FMT
// 24   | FDF when FMT bit 5 is set, otherwise 8 bit FDF + 16 bit SYT
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CipHeader {
    pub sid: u8,
    pub dbs: u8,
    pub fraction: u8,
    pub qpc: u8,
    pub sph: bool,
    pub dbc: u8,
    pub fmt: Format,
    pub fdf: u32,
    pub syt: Option<u16>,
}

impl CipHeader {
    pub fn try_new(header: &[u8]) -> Result<CipHeader, CipError> {
        if header.len() < CIP_HEADER_SIZE {
            return Err(CipError::BadArgument("payload shorter than a CIP header"));
        }

        if header[0] & 0xC0 != 0x00 || header[4] & 0xC0 != 0x80 {
            return Err(CipError::BadArgument("missing CIP header marker"));
        }

        let mut reader = BitReader::new(&header[..CIP_HEADER_SIZE]);
        let truncated = |_| CipError::BadArgument("truncated CIP header");

        reader.seek_bits(2).map_err(truncated)?;
        let sid = reader.read_bits(6).map_err(truncated)? as u8;
        let dbs = reader.read_bits(8).map_err(truncated)? as u8;
        let fraction = reader.read_bits(2).map_err(truncated)? as u8;
        let qpc = reader.read_bits(3).map_err(truncated)? as u8;
        let sph = reader.read_bit().map_err(truncated)?;
        reader.seek_bits(2).map_err(truncated)?;
        let dbc = reader.read_bits(8).map_err(truncated)? as u8;

        reader.seek_bits(2).map_err(truncated)?;
        let fmt = Format::from(reader.read_bits(6).map_err(truncated)? as u8);

        let (fdf, syt) = if fmt.has_wide_fdf() {
            (reader.read_bits(24).map_err(truncated)? as u32, None)
        } else {
            let fdf = reader.read_bits(8).map_err(truncated)? as u32;
            let syt = reader.read_bits(16).map_err(truncated)? as u16;
            (fdf, Some(syt))
        };

        Ok(CipHeader {
            sid,
            dbs,
            fraction,
            qpc,
            sph,
            dbc,
            fmt,
            fdf,
            syt,
        })
    }

    /// Bytes per data block.
    #[inline(always)]
    pub fn data_block_size(&self) -> usize {
        match self.dbs {
            0 => 256 * 4,
            dbs => dbs as usize * 4,
        }
    }

    /// Data blocks making up one source packet.
    #[inline(always)]
    pub fn blocks_per_source_packet(&self) -> usize {
        1 << self.fraction
    }

    /// Bytes a source packet occupies on the bus, padding and source packet
    /// header included.
    #[inline(always)]
    pub fn source_packet_stride(&self) -> usize {
        self.data_block_size() << self.fraction
    }

    /// Bytes of one source packet as handed to consumers.
    pub fn source_packet_size(&self) -> usize {
        let mut size = self.source_packet_stride().saturating_sub(self.qpc as usize * 4);
        if self.sph {
            size = size.saturating_sub(SOURCE_PACKET_HEADER_SIZE);
        }
        size
    }

    /// The DV FDF byte doubles as the DV mode.
    pub fn dv_mode(&self) -> Option<u8> {
        match self.fmt {
            Format::Dv => Some(self.fdf as u8),
            _ => None,
        }
    }

    pub fn dv_fdf(&self) -> Option<DvFdf> {
        self.dv_mode().map(DvFdf::from)
    }

    pub fn mux<T: Write>(&self, writer: &mut T) -> std::io::Result<()> {
        writer.write_u8(self.sid & 0x3F)?;
        writer.write_u8(self.dbs)?;
        writer.write_u8(((self.fraction & 0x03) << 6) | ((self.qpc & 0x07) << 3) | (u8::from(self.sph) << 2))?;
        writer.write_u8(self.dbc)?;

        let fmt = u8::from(self.fmt) & 0x3F;
        writer.write_u8(0x80 | fmt)?;
        if self.fmt.has_wide_fdf() {
            writer.write_u24::<BigEndian>(self.fdf & 0x00FF_FFFF)?;
        } else {
            writer.write_u8(self.fdf as u8)?;
            writer.write_u16::<BigEndian>(self.syt.unwrap_or(0xFFFF))?;
        }
        Ok(())
    }
}

/// A decoded CIP packet borrowing the caller's payload.
#[derive(Clone, Copy, Debug)]
pub struct CipPacket<'a> {
    pub header: CipHeader,
    data: &'a [u8],
    count: usize,
}

impl<'a> CipPacket<'a> {
    /// Decodes the CIP header at the start of `payload` and lays out the
    /// source packets following it.
    ///
    /// A payload holding only the header is valid and carries no source
    /// packets.
    pub fn parse(payload: &'a [u8]) -> Result<CipPacket<'a>, CipError> {
        let header = CipHeader::try_new(payload)?;
        let data = &payload[CIP_HEADER_SIZE..];

        let stride = header.source_packet_stride();
        if header.source_packet_size() == 0 {
            return Err(CipError::BadArgument("source packet layout leaves no data"));
        }

        let count = (data.len() + stride - 1) / stride;
        if data.len() % stride != 0 || count > MAX_SOURCE_PACKETS {
            log::debug!("CIP {:?} layout: {} data bytes at stride {}", header.fmt, data.len(), stride);
            return Err(CipError::LayoutOverflow {
                payload_len: payload.len(),
                size: stride,
                count,
            });
        }

        Ok(CipPacket { header, data, count })
    }

    #[inline(always)]
    pub fn format(&self) -> Format {
        self.header.fmt
    }

    #[inline(always)]
    pub fn syt(&self) -> Option<u16> {
        self.header.syt
    }

    pub fn source_packet_size(&self) -> usize {
        self.header.source_packet_size()
    }

    pub fn source_packet_count(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Data blocks carried by this packet, which is what DBC advances by.
    pub fn data_block_count(&self) -> usize {
        self.count * self.header.blocks_per_source_packet()
    }

    pub fn source_packet(&self, index: usize) -> Option<&'a [u8]> {
        if index >= self.count {
            return None;
        }

        let stride = self.header.source_packet_stride();
        let start = index * stride + if self.header.sph { SOURCE_PACKET_HEADER_SIZE } else { 0 };
        Some(&self.data[start..start + self.header.source_packet_size()])
    }

    pub fn source_packets(&self) -> SourcePackets<'a> {
        SourcePackets {
            packet: *self,
            index: 0,
        }
    }
}

pub struct SourcePackets<'a> {
    packet: CipPacket<'a>,
    index: usize,
}

impl<'a> Iterator for SourcePackets<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<&'a [u8]> {
        let sp = self.packet.source_packet(self.index)?;
        self.index += 1;
        Some(sp)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.packet.count - self.index;
        (left, Some(left))
    }
}

impl<'a> ExactSizeIterator for SourcePackets<'a> {}
