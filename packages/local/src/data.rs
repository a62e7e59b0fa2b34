//! `data:` URL reads.
//!
//! Decoding a data URL is pure, so the sync handler does the work and the
//! async handler wraps the sync answer in an already-resolved future.

use futures::future;
use futures::FutureExt;

use urlio_codec::decode_data_url;
use urlio_core::{
    is_data_url, BinaryFile, Handler, Next, ReadBinaryFile, ReadBinaryFileSync, Request, Response,
    ServiceBus,
};

pub struct DataUrlReadSync;

impl Handler<ReadBinaryFileSync> for DataUrlReadSync {
    fn description(&self) -> &str {
        "data: decode url (sync)"
    }

    fn handle(
        &self,
        request: Request<ReadBinaryFileSync>,
        next: Next<'_, ReadBinaryFileSync>,
        _bus: &ServiceBus,
    ) -> Response<ReadBinaryFileSync> {
        if !is_data_url(&request.params.url) {
            return next.run(request);
        }

        let url = request.into_params().url;
        let data = decode_data_url(&url)?;
        Ok(BinaryFile {
            base_filename: data.filename().map(str::to_string),
            content: data.data,
            url,
        })
    }
}

pub struct DataUrlRead;

impl Handler<ReadBinaryFile> for DataUrlRead {
    fn description(&self) -> &str {
        "data: decode url"
    }

    fn handle(
        &self,
        request: Request<ReadBinaryFile>,
        next: Next<'_, ReadBinaryFile>,
        bus: &ServiceBus,
    ) -> Response<ReadBinaryFile> {
        if !is_data_url(&request.params.url) {
            return next.run(request);
        }

        let file = bus.dispatch(Request::<ReadBinaryFileSync>::new(request.into_params()))?;
        Ok(future::ready(Ok(file)).boxed())
    }
}
