//! Gzip detection, compression and decompression.

use std::io::{Read, Write};

use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

use urlio_core::Error;

/// First two bytes of every gzip member.
pub const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Sniff the gzip magic bytes.
pub fn is_gzip(bytes: &[u8]) -> bool {
    bytes.starts_with(&GZIP_MAGIC)
}

/// Decompress a gzip stream. Concatenated members are decoded in sequence.
pub fn gunzip(bytes: &[u8]) -> Result<Vec<u8>, Error> {
    let mut decoder = MultiGzDecoder::new(bytes);
    let mut out = Vec::new();
    decoder
        .read_to_end(&mut out)
        .map_err(|e| Error::decode(format!("corrupt gzip stream: {}", e)))?;
    Ok(out)
}

/// Compress bytes into a single gzip member.
pub fn gzip(bytes: &[u8]) -> Result<Vec<u8>, Error> {
    gzip_into(Vec::new(), bytes)
}

fn gzip_into<W: Write>(sink: W, bytes: &[u8]) -> Result<W, Error> {
    let mut encoder = GzEncoder::new(sink, Compression::default());
    encoder.write_all(bytes).map_err(compression_failed)?;
    encoder.finish().map_err(compression_failed)
}

fn compression_failed(e: std::io::Error) -> Error {
    Error::decode(format!("gzip compression failed: {}", e))
}
