//! Request kinds, their parameters, and their payloads.
//!
//! Each operation is a marker type implementing [`RequestKind`]. The kind
//! fixes both the parameter type and the output type, so a request can never
//! be reinterpreted as a different operation, and a synchronous kind can
//! never be answered with a deferred value (or vice versa).

use std::fmt;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use futures::future::BoxFuture;
use url::Url;

use crate::{Error, TextEncoding};

/// A computation the caller awaits on its own schedule.
pub type Deferred<T> = BoxFuture<'static, Result<T, Error>>;

/// The outcome of a dispatch: `Ok` is success, `Err` is failure.
pub type Response<K> = Result<<K as RequestKind>::Output, Error>;

/// Parameters of a request.
pub trait RequestParams: fmt::Debug + Send + 'static {
    /// The resource this request addresses, if it addresses one.
    fn url(&self) -> Option<&Url> {
        None
    }
}

/// An operation the bus can dispatch.
pub trait RequestKind: Send + Sync + 'static {
    type Params: RequestParams;
    type Output: Send + 'static;

    /// Stable name used in logs, errors, and the registration listing.
    const NAME: &'static str;
}

/// A single request of kind `K`. Constructed per call and consumed once.
pub struct Request<K: RequestKind> {
    pub params: K::Params,
}

impl<K: RequestKind> Request<K> {
    pub fn new(params: K::Params) -> Self {
        Self { params }
    }

    pub fn kind(&self) -> &'static str {
        K::NAME
    }

    pub fn url(&self) -> Option<&Url> {
        self.params.url()
    }

    pub fn into_params(self) -> K::Params {
        self.params
    }
}

impl<K: RequestKind> Clone for Request<K>
where
    K::Params: Clone,
{
    fn clone(&self) -> Self {
        Self {
            params: self.params.clone(),
        }
    }
}

impl<K: RequestKind> fmt::Debug for Request<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Request")
            .field("kind", &K::NAME)
            .field("url", &self.url().map(Url::as_str))
            .field("params", &self.params)
            .finish()
    }
}

// === Parameters ===

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlParams {
    pub url: Url,
}

impl UrlParams {
    pub fn new(url: Url) -> Self {
        Self { url }
    }
}

impl From<Url> for UrlParams {
    fn from(url: Url) -> Self {
        Self { url }
    }
}

impl RequestParams for UrlParams {
    fn url(&self) -> Option<&Url> {
        Some(&self.url)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextParams {
    pub url: Url,
    pub encoding: TextEncoding,
}

impl TextParams {
    pub fn new(url: Url, encoding: TextEncoding) -> Self {
        Self { url, encoding }
    }
}

impl RequestParams for TextParams {
    fn url(&self) -> Option<&Url> {
        Some(&self.url)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteParams {
    pub url: Url,
    pub content: Bytes,
}

impl WriteParams {
    pub fn new(url: Url, content: impl Into<Bytes>) -> Self {
        Self {
            url,
            content: content.into(),
        }
    }
}

impl RequestParams for WriteParams {
    fn url(&self) -> Option<&Url> {
        Some(&self.url)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InflateParams {
    pub data: Bytes,
}

impl InflateParams {
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self { data: data.into() }
    }
}

impl RequestParams for InflateParams {}

// === Payloads ===

/// Raw bytes of a resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryFile {
    pub url: Url,
    pub content: Bytes,
    /// Filename carried by the resource itself (the `filename` attribute of
    /// a data URL). `None` for every other backend.
    pub base_filename: Option<String>,
}

/// A decoded text resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFile {
    pub url: Url,
    pub base_filename: Option<String>,
    pub encoding: TextEncoding,
    pub content: String,
    /// The bytes were gzip-compressed and inflated on the way.
    pub gz: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileType {
    File,
    Directory,
    SymbolicLink,
    Unknown,
}

/// Metadata of a resource, the same shape for every backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stats {
    pub size: u64,
    pub mtime: Option<DateTime<Utc>>,
    pub etag: Option<String>,
    pub file_type: FileType,
}

/// The target of a completed write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReference {
    pub url: Url,
}

// === Kinds ===

macro_rules! request_kind {
    ($(#[$meta:meta])* $kind:ident($params:ty) -> $output:ty) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy)]
        pub struct $kind;

        impl RequestKind for $kind {
            type Params = $params;
            type Output = $output;
            const NAME: &'static str = stringify!($kind);
        }
    };
}

request_kind!(
    /// Read all bytes of a resource.
    ReadBinaryFile(UrlParams) -> Deferred<BinaryFile>
);
request_kind!(
    /// Blocking [`ReadBinaryFile`].
    ReadBinaryFileSync(UrlParams) -> BinaryFile
);
request_kind!(
    /// Read a resource as text, inflating gzip content transparently.
    ReadTextFile(TextParams) -> Deferred<TextFile>
);
request_kind!(
    /// Blocking [`ReadTextFile`].
    ReadTextFileSync(TextParams) -> TextFile
);
request_kind!(
    /// Fetch resource metadata.
    Stat(UrlParams) -> Deferred<Stats>
);
request_kind!(
    /// Blocking [`Stat`].
    StatSync(UrlParams) -> Stats
);
request_kind!(
    /// Persist bytes, compressing them when the target ends in `.gz`.
    WriteFile(WriteParams) -> Deferred<FileReference>
);
request_kind!(
    /// Gunzip bytes and decode them as UTF-8.
    Inflate(InflateParams) -> String
);
