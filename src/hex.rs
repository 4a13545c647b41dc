//! Utility module for hex formatting of fixed-width byte strings.
use core::fmt;

/// Writes `bytes` to the formatter as lowercase hex.
pub(crate) fn fmt_bytes(f: &mut fmt::Formatter, bytes: &[u8]) -> fmt::Result {
    for byte in bytes {
        write!(f, "{:02x}", byte)?;
    }
    Ok(())
}
