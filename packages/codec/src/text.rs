//! Bytes to text.
//!
//! Decoding is lossy: invalid sequences become U+FFFD rather than errors.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use urlio_core::{Error, TextEncoding};

use crate::gzip::{gunzip, is_gzip};

const UTF8_BOM: [u8; 3] = [0xef, 0xbb, 0xbf];
const UTF16LE_BOM: [u8; 2] = [0xff, 0xfe];
const UTF16BE_BOM: [u8; 2] = [0xfe, 0xff];

/// Text produced from a byte buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedText {
    pub content: String,
    /// The buffer was gzip data and was inflated before decoding.
    pub gz: bool,
}

/// Decode a buffer, inflating it first when it starts with the gzip magic.
pub fn buffer_to_text(bytes: &[u8], encoding: TextEncoding) -> Result<DecodedText, Error> {
    if is_gzip(bytes) {
        let inflated = gunzip(bytes)?;
        return Ok(DecodedText {
            content: decode(&inflated, encoding),
            gz: true,
        });
    }
    Ok(DecodedText {
        content: decode(bytes, encoding),
        gz: false,
    })
}

/// Decode bytes with `encoding`.
///
/// For the Unicode encodings a byte-order mark wins over the requested
/// encoding, and is not part of the result.
pub fn decode(bytes: &[u8], encoding: TextEncoding) -> String {
    if encoding.is_unicode() {
        if let Some(rest) = bytes.strip_prefix(&UTF16LE_BOM) {
            return decode_utf16(rest, u16::from_le_bytes);
        }
        if let Some(rest) = bytes.strip_prefix(&UTF16BE_BOM) {
            return decode_utf16(rest, u16::from_be_bytes);
        }
        if let Some(rest) = bytes.strip_prefix(&UTF8_BOM) {
            return String::from_utf8_lossy(rest).into_owned();
        }
    }

    match encoding {
        TextEncoding::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
        TextEncoding::Utf16Le => decode_utf16(bytes, u16::from_le_bytes),
        TextEncoding::Utf16Be => decode_utf16(bytes, u16::from_be_bytes),
        TextEncoding::Latin1 => bytes.iter().map(|&b| char::from(b)).collect(),
        TextEncoding::Ascii => bytes.iter().map(|&b| char::from(b & 0x7f)).collect(),
        TextEncoding::Base64 => STANDARD.encode(bytes),
        TextEncoding::Hex => hex::encode(bytes),
    }
}

fn decode_utf16(bytes: &[u8], to_unit: fn([u8; 2]) -> u16) -> String {
    let chunks = bytes.chunks_exact(2);
    let trailing = !chunks.remainder().is_empty();
    let units = chunks.map(|pair| to_unit([pair[0], pair[1]]));

    let mut text: String = char::decode_utf16(units)
        .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect();
    if trailing {
        text.push(char::REPLACEMENT_CHARACTER);
    }
    text
}
