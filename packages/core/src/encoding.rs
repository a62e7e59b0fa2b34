//! Text encoding names accepted by text reads.

use std::fmt;
use std::str::FromStr;

use crate::Error;

/// How the bytes of a text read are turned into a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextEncoding {
    #[default]
    Utf8,
    Utf16Le,
    Utf16Be,
    /// One byte per code point (also accepted as `binary`).
    Latin1,
    /// Like latin1 with the high bit cleared.
    Ascii,
    /// Render the bytes as base64 text.
    Base64,
    /// Render the bytes as lowercase hex.
    Hex,
}

impl TextEncoding {
    pub fn name(&self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf8",
            TextEncoding::Utf16Le => "utf16le",
            TextEncoding::Utf16Be => "utf16be",
            TextEncoding::Latin1 => "latin1",
            TextEncoding::Ascii => "ascii",
            TextEncoding::Base64 => "base64",
            TextEncoding::Hex => "hex",
        }
    }

    /// Whether a byte-order mark in the content may override this encoding.
    pub fn is_unicode(&self) -> bool {
        matches!(
            self,
            TextEncoding::Utf8 | TextEncoding::Utf16Le | TextEncoding::Utf16Be
        )
    }
}

impl FromStr for TextEncoding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let encoding = match s.to_ascii_lowercase().as_str() {
            "utf8" | "utf-8" => TextEncoding::Utf8,
            "utf16le" | "utf-16le" | "ucs2" | "ucs-2" => TextEncoding::Utf16Le,
            "utf16be" | "utf-16be" => TextEncoding::Utf16Be,
            "latin1" | "binary" | "iso-8859-1" => TextEncoding::Latin1,
            "ascii" => TextEncoding::Ascii,
            "base64" => TextEncoding::Base64,
            "hex" => TextEncoding::Hex,
            other => {
                return Err(Error::decode(format!("unknown text encoding '{}'", other)));
            }
        };
        Ok(encoding)
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
