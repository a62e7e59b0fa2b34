//! Codec primitives used by the urlio handlers.
//!
//! Nothing here touches the bus or performs I/O. Handlers decide *when* to
//! call these; this crate only knows *how*.

pub mod data_url;
pub mod gzip;
pub mod text;

pub use data_url::{decode_data_url, encode_data_url, parse_data_url, DataUrl};
pub use gzip::{gunzip, gzip, is_gzip, GZIP_MAGIC};
pub use text::{buffer_to_text, decode, DecodedText};
