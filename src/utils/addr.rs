//! IPv4 address text parsing

use crate::error::{QqwryError, Result};

/// Parse a dotted-quad IPv4 string into a big-endian u32.
///
/// Exactly four dot-separated decimal segments are required and each must fit
/// in a byte. The original reference composed unchecked 64-bit shifts, so its
/// behavior for segments above 255 was implementation-defined; here such
/// segments are rejected as `InvalidAddress`.
pub fn parse_ipv4(text: &str) -> Result<u32> {
    let parts: Vec<&str> = text.split('.').collect();
    if parts.len() != 4 {
        return Err(QqwryError::invalid_address(text));
    }

    let mut ip = 0u32;
    for part in parts {
        let octet: u8 = part
            .parse()
            .map_err(|_| QqwryError::invalid_address(text))?;
        ip = (ip << 8) | u32::from(octet);
    }
    Ok(ip)
}
