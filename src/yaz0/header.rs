use super::constants::{YAZ0_HEADER_SIZE, YAZ0_MAGIC, YAZ0_MAGIC_SIZE};
use crate::error::{Error, Result};

/// Parsed Yaz0 stream header (16 bytes, big-endian)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Yaz0Header {
    /// Exact length of the decompressed payload
    pub uncompressed_size: u32,
    /// Bytes 8-15, ignored by decompression
    pub reserved: [u8; 8],
}

impl Yaz0Header {
    /// Parse a header that must start at the beginning of `data`
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() >= YAZ0_MAGIC_SIZE {
            let magic = [data[0], data[1], data[2], data[3]];
            if magic != YAZ0_MAGIC {
                return Err(Error::InvalidMagic(magic));
            }
        }
        Self::read_at(data, 0)
    }

    /// Read the header whose magic tag sits at `offset` in `buf`.
    ///
    /// The magic itself is not re-checked; callers get here from a magic search.
    pub fn read_at(buf: &[u8], offset: usize) -> Result<Self> {
        let available = buf.len().saturating_sub(offset);
        if available < YAZ0_HEADER_SIZE {
            return Err(Error::TruncatedHeader { offset, available });
        }

        let header = &buf[offset..offset + YAZ0_HEADER_SIZE];
        let uncompressed_size = u32::from_be_bytes([header[4], header[5], header[6], header[7]]);

        let mut reserved = [0u8; 8];
        reserved.copy_from_slice(&header[8..16]);

        Ok(Yaz0Header { uncompressed_size, reserved })
    }

    /// Data alignment hint stored in the first reserved word by newer
    /// toolchains (0 when unused)
    pub fn alignment(&self) -> u32 {
        u32::from_be_bytes([self.reserved[0], self.reserved[1], self.reserved[2], self.reserved[3]])
    }

    /// Serialize back to the 16-byte on-disk form
    pub fn to_bytes(&self) -> [u8; YAZ0_HEADER_SIZE] {
        let mut out = [0u8; YAZ0_HEADER_SIZE];
        out[..4].copy_from_slice(&YAZ0_MAGIC);
        out[4..8].copy_from_slice(&self.uncompressed_size.to_be_bytes());
        out[8..].copy_from_slice(&self.reserved);
        out
    }
}
