//! Gzip-aware write and the inflate primitive.

use tracing::debug;

use urlio_codec::{gunzip, gzip};
use urlio_core::{
    is_gz_file, Handler, Inflate, Next, Request, Response, ServiceBus, WriteFile,
};

/// Compress content headed for a `.gz` target, then let the plain write
/// persist it. Other targets pass through untouched.
pub struct GzWriteFile;

impl Handler<WriteFile> for GzWriteFile {
    fn description(&self) -> &str {
        "gzip: compress .gz writes"
    }

    fn handle(
        &self,
        mut request: Request<WriteFile>,
        next: Next<'_, WriteFile>,
        _bus: &ServiceBus,
    ) -> Response<WriteFile> {
        if !is_gz_file(&request.params.url) {
            return next.run(request);
        }

        let compressed = gzip(&request.params.content)?;
        debug!(
            url = %request.params.url,
            raw = request.params.content.len(),
            compressed = compressed.len(),
            "compressing write"
        );
        request.params.content = compressed.into();
        next.run(request)
    }
}

/// Gunzip a buffer and decode it as UTF-8.
pub struct GzInflate;

impl Handler<Inflate> for GzInflate {
    fn description(&self) -> &str {
        "gzip: inflate"
    }

    fn handle(
        &self,
        request: Request<Inflate>,
        _next: Next<'_, Inflate>,
        _bus: &ServiceBus,
    ) -> Response<Inflate> {
        let inflated = gunzip(&request.params.data)?;
        Ok(String::from_utf8_lossy(&inflated).into_owned())
    }
}
