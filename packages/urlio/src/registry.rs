//! The default handler set.

use urlio_core::{Error, ServiceBus, ServiceBusBuilder};
use urlio_http::{HttpReadBinaryFile, HttpStat};
use urlio_local::{
    DataUrlRead, DataUrlReadSync, FsReadBinaryFile, FsReadBinaryFileSync, FsStat, FsStatSync,
    FsWriteFile, GzInflate, GzWriteFile, ReadTextViaBinary, ReadTextViaBinarySync,
};

use crate::config::IoConfig;

/// Install the standard handlers on `builder`.
///
/// The order is load-bearing. Within each kind the last handler registered
/// is consulted first, so specialized handlers (gzip writes, `data:` and HTTP
/// URLs) come after the filesystem base they fall back to.
pub fn register_handlers(
    builder: &mut ServiceBusBuilder,
    config: &IoConfig,
) -> Result<(), Error> {
    let client = config.http.build_client()?;

    builder
        .register(FsWriteFile)
        .register(GzWriteFile)
        .register(FsReadBinaryFile)
        .register(FsReadBinaryFileSync)
        .register(HttpReadBinaryFile::with_client(client.clone()))
        .register(DataUrlRead)
        .register(DataUrlReadSync)
        .register(ReadTextViaBinary)
        .register(ReadTextViaBinarySync)
        .register(GzInflate)
        .register(FsStatSync)
        .register(FsStat)
        .register(HttpStat::with_client(client));
    Ok(())
}

/// A bus with only the standard handlers.
pub fn default_bus(config: &IoConfig) -> Result<ServiceBus, Error> {
    let mut builder = ServiceBus::builder();
    register_handlers(&mut builder, config)?;
    Ok(builder.build())
}
