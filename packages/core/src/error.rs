//! Error types shared by every handler.
//!
//! A handler never swallows an error: whatever it gets from its backend is
//! wrapped here and returned as the terminal failure of the dispatch.

use std::io;

/// Errors produced while dispatching a request.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Filesystem failure. The `io::Error` is kept as-is so callers can
    /// inspect its kind.
    #[error("{url}: {source}")]
    Io {
        url: String,
        #[source]
        source: io::Error,
    },

    /// No handler in the chain claimed the request.
    #[error("unhandled request: {kind} ({})", .url.as_deref().unwrap_or("no url"))]
    UnhandledRequest {
        kind: &'static str,
        url: Option<String>,
    },

    /// Handlers kept dispatching nested requests past the depth limit.
    #[error("request depth exceeded while dispatching {kind} (depth {depth})")]
    DepthExceeded { kind: &'static str, depth: usize },

    /// The URL cannot be served by the handler that received it.
    #[error("invalid url '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    /// Malformed data URL, bad text encoding, or corrupt gzip stream.
    #[error("decode error: {message}")]
    Decode { message: String },

    /// The server answered with a non-success status.
    #[error("HTTP {status} fetching {url}")]
    HttpStatus { url: String, status: u16 },

    /// Any other backend failure (network, TLS, ...).
    #[error("transport error: {0}")]
    Transport(Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    /// Wrap an I/O error raised while accessing `url`.
    pub fn io(url: impl ToString, source: io::Error) -> Self {
        Error::Io {
            url: url.to_string(),
            source,
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Error::Decode {
            message: message.into(),
        }
    }

    /// The underlying I/O error kind, when this is a filesystem failure.
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            Error::Io { source, .. } => Some(source.kind()),
            _ => None,
        }
    }

    /// True for a missing file or an HTTP 404.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Io { source, .. } => source.kind() == io::ErrorKind::NotFound,
            Error::HttpStatus { status, .. } => *status == 404,
            _ => false,
        }
    }
}
