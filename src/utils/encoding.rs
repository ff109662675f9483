//! Character encoding utilities
//!
//! The qqwry database stores all strings in the legacy GB18030 double-byte
//! Chinese encoding; this module converts them to UTF-8.

use crate::error::{QqwryError, Result};
use encoding_rs::GB18030;

/// Convert GB18030 encoded bytes to a UTF-8 string.
///
/// Returns `MalformedText` when the decoder reports invalid sequences;
/// callers that want the legacy best-effort behavior recover from that by
/// substituting an empty string.
pub fn gb18030_to_utf8(data: &[u8]) -> Result<String> {
    let (cow, _encoding_used, had_errors) = GB18030.decode(data);

    if had_errors {
        log::debug!("GB18030 decoding had errors for bytes: {:?}", data);
        return Err(QqwryError::malformed_text(format!(
            "invalid GB18030 sequence in {} bytes",
            data.len()
        )));
    }

    Ok(cow.into_owned())
}
