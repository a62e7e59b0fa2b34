use std::sync::Arc;

use urlio_core::{
    to_url, BinaryFile, Bytes, Error, FileReference, Inflate, InflateParams, ReadBinaryFile,
    ReadBinaryFileSync, ReadTextFile, ReadTextFileSync, Request, ServiceBus, Stat, StatSync,
    Stats, TextEncoding, TextFile, TextParams, UrlParams, WriteFile, WriteParams,
};

use crate::config::IoConfig;
use crate::registry::default_bus;

/// Convenience front end over a [`ServiceBus`].
///
/// Every location is a URL or a filesystem path, resolved with
/// [`to_url`]. Cloning is cheap; clones share the bus.
#[derive(Debug, Clone)]
pub struct ResourceIo {
    bus: Arc<ServiceBus>,
}

impl ResourceIo {
    /// Standard handlers, default configuration.
    pub fn new() -> Result<Self, Error> {
        Self::with_config(&IoConfig::default())
    }

    pub fn with_config(config: &IoConfig) -> Result<Self, Error> {
        Ok(Self::with_bus(default_bus(config)?))
    }

    /// Use a caller-assembled bus, e.g. one with extra handlers registered
    /// on top of [`register_handlers`](crate::register_handlers).
    pub fn with_bus(bus: ServiceBus) -> Self {
        Self { bus: Arc::new(bus) }
    }

    pub fn bus(&self) -> &ServiceBus {
        &self.bus
    }

    pub async fn read_file(
        &self,
        location: &str,
        encoding: TextEncoding,
    ) -> Result<TextFile, Error> {
        let params = TextParams::new(to_url(location)?, encoding);
        self.bus.dispatch(Request::<ReadTextFile>::new(params))?.await
    }

    pub fn read_file_sync(
        &self,
        location: &str,
        encoding: TextEncoding,
    ) -> Result<TextFile, Error> {
        let params = TextParams::new(to_url(location)?, encoding);
        self.bus.dispatch(Request::<ReadTextFileSync>::new(params))
    }

    pub async fn read_binary_file(&self, location: &str) -> Result<BinaryFile, Error> {
        let params = UrlParams::new(to_url(location)?);
        self.bus.dispatch(Request::<ReadBinaryFile>::new(params))?.await
    }

    pub fn read_binary_file_sync(&self, location: &str) -> Result<BinaryFile, Error> {
        let params = UrlParams::new(to_url(location)?);
        self.bus.dispatch(Request::<ReadBinaryFileSync>::new(params))
    }

    /// Write `content` to `location`. A `.gz` target is stored compressed.
    pub async fn write_file(
        &self,
        location: &str,
        content: impl Into<Bytes>,
    ) -> Result<FileReference, Error> {
        let params = WriteParams::new(to_url(location)?, content);
        self.bus.dispatch(Request::<WriteFile>::new(params))?.await
    }

    pub async fn get_stat(&self, location: &str) -> Result<Stats, Error> {
        let params = UrlParams::new(to_url(location)?);
        self.bus.dispatch(Request::<Stat>::new(params))?.await
    }

    pub fn get_stat_sync(&self, location: &str) -> Result<Stats, Error> {
        let params = UrlParams::new(to_url(location)?);
        self.bus.dispatch(Request::<StatSync>::new(params))
    }

    /// Gunzip `data` and decode the result as UTF-8.
    pub fn inflate(&self, data: impl Into<Bytes>) -> Result<String, Error> {
        self.bus.dispatch(Request::<Inflate>::new(InflateParams::new(data)))
    }
}
