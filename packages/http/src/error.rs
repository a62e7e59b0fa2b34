use url::Url;

use urlio_core::Error as CoreError;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} fetching {url}")]
    Status { url: Url, status: u16 },

    #[error("Invalid header name: {0}")]
    InvalidHeaderName(#[from] http::header::InvalidHeaderName),

    #[error("Invalid header value: {0}")]
    InvalidHeaderValue(#[from] http::header::InvalidHeaderValue),
}

impl From<Error> for CoreError {
    fn from(error: Error) -> Self {
        match error {
            Error::Status { url, status } => CoreError::HttpStatus {
                url: url.to_string(),
                status,
            },
            other => CoreError::Transport(Box::new(other)),
        }
    }
}
