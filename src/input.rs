//! Input decoding and validation.
//!
//! The pipeline works on decoded text. These helpers turn raw bytes into
//! `&str`, rejecting containers and encodings that must be handled upstream.

use crate::error::{Error, Result};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
const UTF16_LE_BOM: &[u8] = b"\xFF\xFE";
const UTF16_BE_BOM: &[u8] = b"\xFE\xFF";
const PDF_MAGIC: &[u8] = b"%PDF-";

/// Decode document bytes as UTF-8 text.
///
/// A leading UTF-8 byte order mark is skipped.
///
/// # Errors
///
/// Returns [`Error::Input`] when the data carries a UTF-16 byte order mark
/// or is not valid UTF-8. The offset names the first offending byte. Text
/// that merely starts with a PDF header is accepted; binary PDF data fails
/// as invalid UTF-8 with a message saying so.
///
/// # Example
/// ```
/// use docsplit::input::decode_text;
///
/// assert_eq!(decode_text(b"\xEF\xBB\xBFAbstract").unwrap(), "Abstract");
/// assert!(decode_text(b"bad \xFF byte").is_err());
/// ```
pub fn decode_text(data: &[u8]) -> Result<&str> {
    if data.starts_with(UTF16_LE_BOM) || data.starts_with(UTF16_BE_BOM) {
        return Err(Error::Input {
            offset: 0,
            message: "UTF-16 text is not supported; transcode to UTF-8".to_string(),
        });
    }

    let (body, skipped) = match data.strip_prefix(UTF8_BOM) {
        Some(rest) => (rest, UTF8_BOM.len()),
        None => (data, 0),
    };

    std::str::from_utf8(body).map_err(|e| {
        let message = if body.starts_with(PDF_MAGIC) {
            "binary PDF container; extract its text before processing"
        } else {
            "invalid UTF-8 sequence"
        };
        Error::Input {
            offset: skipped + e.valid_up_to(),
            message: message.to_string(),
        }
    })
}

/// Check if bytes decode to processable text.
pub fn is_text_bytes(data: &[u8]) -> bool {
    decode_text(data).is_ok()
}
