//! Record decoding for the qqwry redirect scheme
//!
//! A range record starts with the range's ending IP (4 bytes), followed by a
//! mode byte. Mode 0x01 redirects the whole record, mode 0x02 redirects only
//! the main info, anything else is an inline string. The strings themselves
//! are deduplicated through these redirects, which is why the chase depth is
//! bounded: at most two levels for the main info and one for the sub info.

use serde::Serialize;

use crate::database::buffer::ByteView;
use crate::database::index::IndexEntry;
use crate::error::Result;

/// Whole-record redirect: the next 3 bytes point at the actual record body
pub const REDIRECT_MODE_1: u8 = 0x01;
/// Main-info redirect: the next 3 bytes point at the main-info string only
pub const REDIRECT_MODE_2: u8 = 0x02;

/// Decoded country/region text and extra/ISP text for one IP range
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ZonePair {
    /// Country/region text, as encoded in the database
    pub main_info: String,
    /// Extra/ISP text, may be empty
    pub sub_info: String,
}

/// Decode the record behind an index entry into its string pair.
///
/// Decoding is best-effort: an unreadable record yields an all-empty pair
/// and a corrupt sub info never suppresses a decoded main info.
pub fn decode(view: &ByteView, entry: &IndexEntry) -> ZonePair {
    match decode_record(view, entry.record_offset as usize) {
        Ok(pair) => pair,
        Err(err) => {
            log::debug!(
                "unreadable record at offset {:#x}: {err}",
                entry.record_offset
            );
            ZonePair::default()
        }
    }
}

fn decode_record(view: &ByteView, record_offset: usize) -> Result<ZonePair> {
    let pos = record_offset + 4; // skip the ending IP
    let mode = view.read_u8(pos)?;
    if mode == REDIRECT_MODE_1 {
        let offset = view.read_u24_le(pos + 1)? as usize;
        if view.read_u8(offset)? == REDIRECT_MODE_2 {
            // nested redirect: the target is itself a mode-2 record body
            decode_mode2(view, offset)
        } else {
            let (main_info, len) = view.read_cstring(offset)?;
            let sub_info = read_sub_info(view, offset + len);
            Ok(ZonePair {
                main_info,
                sub_info,
            })
        }
    } else if mode == REDIRECT_MODE_2 {
        decode_mode2(view, pos)
    } else {
        let (main_info, len) = view.read_cstring(pos)?;
        let sub_info = read_sub_info(view, pos + len);
        Ok(ZonePair {
            main_info,
            sub_info,
        })
    }
}

/// Decode a mode-2 body at `offset`: 0x02, a 3-byte pointer to the main
/// info, then the sub info inline.
fn decode_mode2(view: &ByteView, offset: usize) -> Result<ZonePair> {
    let main_offset = view.read_u24_le(offset + 1)? as usize;
    let (main_info, _) = view.read_cstring(main_offset)?;
    let sub_info = read_sub_info(view, offset + 4);
    Ok(ZonePair {
        main_info,
        sub_info,
    })
}

/// Read the sub info at `offset`, following at most one level of redirect.
///
/// The 0x01/0x02 markers at this position are ambiguous in the legacy
/// format; both are treated as a single 3-byte pointer (0 meaning empty)
/// and no further redirects are chased. Any failure degrades to an empty
/// string.
fn read_sub_info(view: &ByteView, offset: usize) -> String {
    match try_read_sub_info(view, offset) {
        Ok(text) => text,
        Err(err) => {
            log::debug!("unreadable sub info at offset {offset:#x}: {err}");
            String::new()
        }
    }
}

fn try_read_sub_info(view: &ByteView, offset: usize) -> Result<String> {
    let marker = view.read_u8(offset)?;
    if marker == REDIRECT_MODE_1 || marker == REDIRECT_MODE_2 {
        let target = view.read_u24_le(offset + 1)? as usize;
        if target == 0 {
            return Ok(String::new());
        }
        Ok(view.read_cstring(target)?.0)
    } else {
        Ok(view.read_cstring(offset)?.0)
    }
}
