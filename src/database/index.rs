//! Binary search over the sorted range-index region
//!
//! The index region is a sorted sequence of 7-byte records between the two
//! header offsets. Each record holds the range's starting IP (4 bytes, LE)
//! and a 3-byte absolute offset to the terminating record, whose first 4
//! bytes are the range's ending IP.

use crate::database::buffer::ByteView;
use crate::error::Result;

/// Length of one index record: 4 bytes IP + 3 bytes offset
pub const INDEX_RECORD_LEN: u32 = 7;

/// One contiguous IP range and the absolute offset of its record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexEntry {
    pub min_ip: u32,
    pub max_ip: u32,
    pub record_offset: u32,
}

/// Binary-search the index region for the record covering `ip`.
///
/// The search walks record-aligned byte positions, not logical indices.
/// When it converges on a single record, that record is returned even if
/// `ip` falls outside its bounds. This best-effort fallback is a contract
/// inherited from the legacy format: out-of-range addresses such as loopback
/// still resolve to some (typically reserved) range rather than `None`.
/// `None` is returned only for an empty index.
pub fn search(view: &ByteView, index_head: u32, index_tail: u32, ip: u32) -> Result<Option<IndexEntry>> {
    let mut head = index_head;
    let mut tail = index_tail;

    while tail > head {
        let cur = middle_offset(head, tail);
        let entry = read_entry(view, cur)?;
        if ip >= entry.min_ip && ip <= entry.max_ip {
            return Ok(Some(entry));
        }
        // converged on a single record: legacy best-effort result
        if cur == head || cur == tail {
            return Ok(Some(entry));
        }
        if ip < entry.min_ip {
            tail = cur;
        } else {
            head = cur;
        }
    }
    Ok(None)
}

/// Record-aligned midpoint between two index positions.
///
/// Half the record count, rounded down with a floor of one record, so the
/// search always makes forward progress.
fn middle_offset(begin: u32, end: u32) -> u32 {
    let mut records = (end - begin) / INDEX_RECORD_LEN / 2;
    if records == 0 {
        records = 1;
    }
    begin + records * INDEX_RECORD_LEN
}

/// Read the index record at `offset` and resolve its ending IP from the
/// terminating record it points to.
fn read_entry(view: &ByteView, offset: u32) -> Result<IndexEntry> {
    let min_ip = view.read_u32_le(offset as usize)?;
    let record_offset = view.read_u24_le(offset as usize + 4)?;
    let max_ip = view.read_u32_le(record_offset as usize)?;
    Ok(IndexEntry {
        min_ip,
        max_ip,
        record_offset,
    })
}
