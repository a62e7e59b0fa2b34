//! # urlio-http
//!
//! Handlers serving `http:` and `https:` URLs with [`reqwest`].
//!
//! Only the async track is served. A synchronous read or stat of an HTTP URL
//! falls through to the filesystem handlers and fails there with an invalid
//! URL error.

pub mod config;
pub mod error;
pub mod read;
pub mod stat;

pub use config::{HttpConfig, DEFAULT_TIMEOUT_SECS};
pub use error::Error;
pub use read::HttpReadBinaryFile;
pub use stat::HttpStat;
