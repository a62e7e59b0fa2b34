//! HTTP(S) binary reads.
//!
//! Bytes are returned exactly as the server sent them. The client is built
//! without transparent decompression, so a gzip body reaches the text layer
//! still compressed and is inflated there exactly once.

use futures::FutureExt;
use reqwest::Client;
use tracing::debug;

use urlio_core::{
    is_http_url, BinaryFile, Handler, Next, ReadBinaryFile, Request, Response, ServiceBus, Url,
};

use crate::config::HttpConfig;
use crate::error::Error;

/// Fetch `http:` and `https:` URLs with a GET.
///
/// Other schemes are forwarded to the rest of the chain.
pub struct HttpReadBinaryFile {
    client: Client,
}

impl HttpReadBinaryFile {
    pub fn new(config: &HttpConfig) -> Result<Self, Error> {
        Ok(Self::with_client(config.build_client()?))
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Handler<ReadBinaryFile> for HttpReadBinaryFile {
    fn description(&self) -> &str {
        "http: fetch url"
    }

    fn handle(
        &self,
        request: Request<ReadBinaryFile>,
        next: Next<'_, ReadBinaryFile>,
        _bus: &ServiceBus,
    ) -> Response<ReadBinaryFile> {
        if !is_http_url(&request.params.url) {
            return next.run(request);
        }

        let url = request.into_params().url;
        Ok(fetch_url(self.client.clone(), url)
            .map(|result| result.map_err(urlio_core::Error::from))
            .boxed())
    }
}

async fn fetch_url(client: Client, url: Url) -> Result<BinaryFile, Error> {
    debug!(%url, "fetching");
    let response = client.get(url.clone()).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::Status {
            url,
            status: status.as_u16(),
        });
    }

    let content = response.bytes().await?;
    Ok(BinaryFile {
        url,
        content,
        base_filename: None,
    })
}
