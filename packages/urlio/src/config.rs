//! Settings for the default handler set.

use serde::{Deserialize, Serialize};
use tracing::debug;

use urlio_core::{Error, ReadTextFileSync, Request, ServiceBus, TextEncoding, TextParams, Url};
use urlio_http::HttpConfig;

/// Top-level configuration, usually loaded from a JSON file.
///
/// ```json
/// {"http": {"timeout_secs": 10}}
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IoConfig {
    pub http: HttpConfig,
}

impl IoConfig {
    pub fn from_json(json: &str) -> Result<Self, Error> {
        serde_json::from_str(json).map_err(|e| Error::decode(format!("invalid config: {e}")))
    }

    /// Read a configuration document through `bus`.
    ///
    /// Anything the bus can read as text works, including gzip-compressed
    /// files and `data:` URLs.
    pub fn load(bus: &ServiceBus, url: Url) -> Result<Self, Error> {
        debug!(%url, "loading config");
        let file = bus.dispatch(Request::<ReadTextFileSync>::new(TextParams::new(
            url,
            TextEncoding::Utf8,
        )))?;
        Self::from_json(&file.content)
    }
}
