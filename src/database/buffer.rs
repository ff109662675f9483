//! Bounds-checked view over the raw database bytes
//!
//! Every read the decoder performs goes through this module, so a corrupt or
//! adversarial database can never cause a read outside the owned buffer. The
//! backing storage is either a heap buffer handed in by the caller or a
//! read-only memory map of the database file.

use memmap2::Mmap;

use crate::error::{QqwryError, Result};
use crate::utils::encoding::gb18030_to_utf8;

/// Backing storage for the database bytes
enum Source {
    Owned(Vec<u8>),
    Mapped(Mmap),
}

/// Immutable owner of the raw database bytes with bounds-checked accessors
pub struct ByteView {
    source: Source,
}

impl ByteView {
    pub fn from_vec(bytes: Vec<u8>) -> Self {
        Self {
            source: Source::Owned(bytes),
        }
    }

    pub fn from_mmap(mmap: Mmap) -> Self {
        Self {
            source: Source::Mapped(mmap),
        }
    }

    fn as_bytes(&self) -> &[u8] {
        match &self.source {
            Source::Owned(bytes) => bytes,
            Source::Mapped(mmap) => mmap,
        }
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }

    /// Read a single byte
    pub fn read_u8(&self, offset: usize) -> Result<u8> {
        self.as_bytes()
            .get(offset)
            .copied()
            .ok_or_else(|| QqwryError::out_of_bounds(offset, self.len()))
    }

    /// Read a little-endian u32
    pub fn read_u32_le(&self, offset: usize) -> Result<u32> {
        let bytes = self.slice(offset, 4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Read a little-endian 3-byte offset into the low bits of a u32
    pub fn read_u24_le(&self, offset: usize) -> Result<u32> {
        let bytes = self.slice(offset, 3)?;
        let v = (bytes[0] as u32) & 0xff;
        let v = v | ((bytes[1] as u32) << 8) & 0xff00;
        let v = v | ((bytes[2] as u32) << 16) & 0xff0000;
        Ok(v)
    }

    /// Read a null-terminated GB18030 string starting at `offset`.
    ///
    /// Returns the decoded text and the total consumed length including the
    /// terminator byte. A missing terminator before the buffer end is
    /// `OutOfBounds`; a text-decoding failure is recovered here by
    /// substituting an empty string, so bad text never aborts a lookup.
    pub fn read_cstring(&self, offset: usize) -> Result<(String, usize)> {
        let data = self.as_bytes();
        if offset >= data.len() {
            return Err(QqwryError::out_of_bounds(offset, data.len()));
        }

        let mut end = offset;
        while end < data.len() && data[end] != 0 {
            end += 1;
        }
        if end == data.len() {
            // ran off the buffer without finding a terminator
            return Err(QqwryError::out_of_bounds(end, data.len()));
        }

        let text = match gb18030_to_utf8(&data[offset..end]) {
            Ok(text) => text,
            Err(err) => {
                log::debug!("undecodable string at offset {offset:#x}: {err}");
                String::new()
            }
        };
        Ok((text, end - offset + 1))
    }

    fn slice(&self, offset: usize, width: usize) -> Result<&[u8]> {
        let data = self.as_bytes();
        if offset + width > data.len() {
            return Err(QqwryError::out_of_bounds(offset, data.len()));
        }
        Ok(&data[offset..offset + width])
    }
}
