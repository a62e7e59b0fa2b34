//! HTTP(S) stat via HEAD.

use chrono::{DateTime, Utc};
use futures::FutureExt;
use http::header::{HeaderMap, CONTENT_LENGTH, ETAG, LAST_MODIFIED};
use reqwest::Client;
use tracing::debug;

use urlio_core::{
    is_http_url, FileType, Handler, Next, Request, Response, ServiceBus, Stat, Stats, Url,
};

use crate::config::HttpConfig;
use crate::error::Error;

/// Stat `http:` and `https:` URLs from the headers of a HEAD response.
///
/// A missing `Content-Length` reports a size of 0. Remote resources are
/// always reported as [`FileType::File`].
pub struct HttpStat {
    client: Client,
}

impl HttpStat {
    pub fn new(config: &HttpConfig) -> Result<Self, Error> {
        Ok(Self::with_client(config.build_client()?))
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Handler<Stat> for HttpStat {
    fn description(&self) -> &str {
        "http: stat url"
    }

    fn handle(
        &self,
        request: Request<Stat>,
        next: Next<'_, Stat>,
        _bus: &ServiceBus,
    ) -> Response<Stat> {
        if !is_http_url(&request.params.url) {
            return next.run(request);
        }

        let url = request.into_params().url;
        Ok(stat_url(self.client.clone(), url)
            .map(|result| result.map_err(urlio_core::Error::from))
            .boxed())
    }
}

async fn stat_url(client: Client, url: Url) -> Result<Stats, Error> {
    debug!(%url, "head");
    let response = client.head(url.clone()).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::Status {
            url,
            status: status.as_u16(),
        });
    }

    Ok(stats_from_headers(response.headers()))
}

fn header_str<'h>(headers: &'h HeaderMap, name: http::header::HeaderName) -> Option<&'h str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

pub(crate) fn stats_from_headers(headers: &HeaderMap) -> Stats {
    let size = header_str(headers, CONTENT_LENGTH)
        .and_then(|value| value.trim().parse::<u64>().ok())
        .unwrap_or(0);
    let mtime = header_str(headers, LAST_MODIFIED)
        .and_then(|value| DateTime::parse_from_rfc2822(value).ok())
        .map(|date| date.with_timezone(&Utc));
    let etag = header_str(headers, ETAG).map(str::to_string);

    Stats {
        size,
        mtime,
        etag,
        file_type: FileType::File,
    }
}
