//! `data:` URLs.
//!
//! ```text
//! data:[<media-type>][;<attr>=<value>]*[;base64],<data>
//! ```
//!
//! Attribute values and non-base64 payloads are percent-decoded.

use std::collections::BTreeMap;

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use bytes::Bytes;
use percent_encoding::{percent_decode_str, utf8_percent_encode, NON_ALPHANUMERIC};
use url::Url;

use urlio_core::Error;

const DATA_PREFIX: &str = "data:";
const BASE64_MARKER: &str = "base64";
const DEFAULT_MEDIA_TYPE: &str = "text/plain";

/// Accepts padded and unpadded payloads.
const LENIENT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// A decoded `data:` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    pub media_type: String,
    pub attributes: BTreeMap<String, String>,
    pub data: Bytes,
    /// The payload was base64 encoded.
    pub base64: bool,
}

impl DataUrl {
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// The `filename` attribute, if present.
    pub fn filename(&self) -> Option<&str> {
        self.attribute("filename")
    }
}

pub fn decode_data_url(url: &Url) -> Result<DataUrl, Error> {
    parse_data_url(url.as_str())
}

pub fn parse_data_url(source: &str) -> Result<DataUrl, Error> {
    let rest = source
        .get(..DATA_PREFIX.len())
        .filter(|prefix| prefix.eq_ignore_ascii_case(DATA_PREFIX))
        .map(|_| &source[DATA_PREFIX.len()..])
        .ok_or_else(|| Error::decode("not a data: url"))?;

    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| Error::decode("data: url is missing the ',' separator"))?;

    let mut segments = header.split(';');
    let media_type = match segments.next().map(str::trim) {
        Some(media_type) if !media_type.is_empty() => media_type.to_ascii_lowercase(),
        _ => DEFAULT_MEDIA_TYPE.to_string(),
    };

    let mut attributes = BTreeMap::new();
    let mut base64 = false;
    for segment in segments {
        if segment.eq_ignore_ascii_case(BASE64_MARKER) {
            base64 = true;
            continue;
        }
        if base64 {
            return Err(Error::decode(format!(
                "unexpected data: url parameter after ;base64: '{}'",
                segment
            )));
        }
        let (name, value) = segment
            .split_once('=')
            .filter(|(name, _)| !name.is_empty())
            .ok_or_else(|| {
                Error::decode(format!("malformed data: url parameter '{}'", segment))
            })?;
        attributes.insert(name.to_ascii_lowercase(), percent_decode_utf8(value)?);
    }

    let data = if base64 {
        let compact: Vec<u8> = percent_decode_str(payload)
            .filter(|b| !b.is_ascii_whitespace())
            .collect();
        LENIENT_BASE64
            .decode(compact)
            .map_err(|e| Error::decode(format!("invalid base64 in data: url: {}", e)))?
    } else {
        percent_decode_str(payload).collect()
    };

    Ok(DataUrl {
        media_type,
        attributes,
        data: Bytes::from(data),
        base64,
    })
}

/// Build a base64 `data:` URL.
pub fn encode_data_url(data: &[u8], media_type: &str, attributes: &[(&str, &str)]) -> String {
    let mut url = format!("{}{}", DATA_PREFIX, media_type);
    for (name, value) in attributes {
        url.push(';');
        url.push_str(name);
        url.push('=');
        url.extend(utf8_percent_encode(value, NON_ALPHANUMERIC));
    }
    url.push(';');
    url.push_str(BASE64_MARKER);
    url.push(',');
    url.push_str(&LENIENT_BASE64.encode(data));
    url
}

fn percent_decode_utf8(value: &str) -> Result<String, Error> {
    percent_decode_str(value)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|e| Error::decode(format!("data: url attribute is not UTF-8: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_payload_is_percent_decoded() {
        let data = parse_data_url("data:,Hello%2C%20World%21").unwrap();
        assert_eq!(data.media_type, "text/plain");
        assert_eq!(&data.data[..], b"Hello, World!");
        assert!(!data.base64);
        assert!(data.filename().is_none());
    }

    #[test]
    fn base64_payload_with_attributes() {
        let data =
            parse_data_url("data:application/json;filename=app%20config.json;base64,e30=")
                .unwrap();
        assert_eq!(data.media_type, "application/json");
        assert_eq!(data.filename(), Some("app config.json"));
        assert_eq!(&data.data[..], b"{}");
        assert!(data.base64);
    }

    #[test]
    fn unpadded_base64_is_accepted() {
        let data = parse_data_url("data:;base64,aGk").unwrap();
        assert_eq!(&data.data[..], b"hi");
    }

    #[test]
    fn parsed_url_round_trips() {
        let source = encode_data_url(
            "line one\nline two".as_bytes(),
            "text/plain",
            &[("filename", "a b.txt"), ("charset", "utf-8")],
        );
        let url = Url::parse(&source).unwrap();
        let data = decode_data_url(&url).unwrap();
        assert_eq!(&data.data[..], "line one\nline two".as_bytes());
        assert_eq!(data.filename(), Some("a b.txt"));
        assert_eq!(data.attribute("charset"), Some("utf-8"));
    }

    #[test]
    fn malformed_urls_are_decode_errors() {
        for source in [
            "data:text/plain",
            "http://example.test/,x",
            "data:text/plain;oops,x",
            "data:;base64,@@@@",
            "data:;base64;filename=x,aGk=",
        ] {
            let err = parse_data_url(source).unwrap_err();
            assert!(matches!(err, Error::Decode { .. }), "{source}: {err}");
        }
    }
}
