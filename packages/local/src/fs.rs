//! Filesystem handlers.
//!
//! These are the generic base of every chain: they are registered first and
//! therefore consulted last. They accept only `file:` URLs; anything else
//! fails with [`Error::InvalidUrl`].

use std::fs::Metadata;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use futures::FutureExt;
use tracing::debug;

use urlio_core::{
    url_to_file_path, BinaryFile, Bytes, Error, FileReference, FileType, Handler, Next,
    ReadBinaryFile, ReadBinaryFileSync, Request, Response, ServiceBus, Stat, StatSync, Stats,
    Url, WriteFile, WriteParams,
};

pub(crate) fn stats_from_metadata(metadata: &Metadata) -> Stats {
    let file_type = metadata.file_type();
    let file_type = if file_type.is_file() {
        FileType::File
    } else if file_type.is_dir() {
        FileType::Directory
    } else if file_type.is_symlink() {
        FileType::SymbolicLink
    } else {
        FileType::Unknown
    };

    Stats {
        size: metadata.len(),
        mtime: metadata.modified().ok().map(DateTime::<Utc>::from),
        etag: None,
        file_type,
    }
}

// ============================================================================
// Binary reads
// ============================================================================

/// Read all bytes of a local file.
pub struct FsReadBinaryFile;

impl Handler<ReadBinaryFile> for FsReadBinaryFile {
    fn description(&self) -> &str {
        "fs: read binary file"
    }

    fn handle(
        &self,
        request: Request<ReadBinaryFile>,
        _next: Next<'_, ReadBinaryFile>,
        _bus: &ServiceBus,
    ) -> Response<ReadBinaryFile> {
        let url = request.into_params().url;
        let path = url_to_file_path(&url)?;
        debug!(path = %path.display(), "reading file");

        Ok(read_file(url, path).boxed())
    }
}

async fn read_file(url: Url, path: PathBuf) -> Result<BinaryFile, Error> {
    let content = tokio::fs::read(&path)
        .await
        .map_err(|e| Error::io(&url, e))?;
    Ok(BinaryFile {
        url,
        content: content.into(),
        base_filename: None,
    })
}

/// Blocking read of all bytes of a local file.
pub struct FsReadBinaryFileSync;

impl Handler<ReadBinaryFileSync> for FsReadBinaryFileSync {
    fn description(&self) -> &str {
        "fs: read binary file (sync)"
    }

    fn handle(
        &self,
        request: Request<ReadBinaryFileSync>,
        _next: Next<'_, ReadBinaryFileSync>,
        _bus: &ServiceBus,
    ) -> Response<ReadBinaryFileSync> {
        let url = request.into_params().url;
        let path = url_to_file_path(&url)?;
        debug!(path = %path.display(), "reading file");

        let content = std::fs::read(&path).map_err(|e| Error::io(&url, e))?;
        Ok(BinaryFile {
            url,
            content: content.into(),
            base_filename: None,
        })
    }
}

// ============================================================================
// Stat
// ============================================================================

pub struct FsStat;

impl Handler<Stat> for FsStat {
    fn description(&self) -> &str {
        "fs: stat"
    }

    fn handle(
        &self,
        request: Request<Stat>,
        _next: Next<'_, Stat>,
        _bus: &ServiceBus,
    ) -> Response<Stat> {
        let url = request.into_params().url;
        let path = url_to_file_path(&url)?;

        Ok(stat_file(url, path).boxed())
    }
}

async fn stat_file(url: Url, path: PathBuf) -> Result<Stats, Error> {
    let metadata = tokio::fs::metadata(&path)
        .await
        .map_err(|e| Error::io(&url, e))?;
    Ok(stats_from_metadata(&metadata))
}

pub struct FsStatSync;

impl Handler<StatSync> for FsStatSync {
    fn description(&self) -> &str {
        "fs: stat (sync)"
    }

    fn handle(
        &self,
        request: Request<StatSync>,
        _next: Next<'_, StatSync>,
        _bus: &ServiceBus,
    ) -> Response<StatSync> {
        let url = request.into_params().url;
        let path = url_to_file_path(&url)?;
        let metadata = std::fs::metadata(&path).map_err(|e| Error::io(&url, e))?;
        Ok(stats_from_metadata(&metadata))
    }
}

// ============================================================================
// Write
// ============================================================================

/// Write bytes verbatim to a local file.
pub struct FsWriteFile;

impl Handler<WriteFile> for FsWriteFile {
    fn description(&self) -> &str {
        "fs: write file"
    }

    fn handle(
        &self,
        request: Request<WriteFile>,
        _next: Next<'_, WriteFile>,
        _bus: &ServiceBus,
    ) -> Response<WriteFile> {
        let WriteParams { url, content } = request.into_params();
        let path = url_to_file_path(&url)?;
        debug!(path = %path.display(), bytes = content.len(), "writing file");

        Ok(write_file(url, path, content).boxed())
    }
}

async fn write_file(url: Url, path: PathBuf, content: Bytes) -> Result<FileReference, Error> {
    tokio::fs::write(&path, &content)
        .await
        .map_err(|e| Error::io(&url, e))?;
    Ok(FileReference { url })
}
