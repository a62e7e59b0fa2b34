//! urlio core: typed requests and the service bus that dispatches them.
//!
//! A request names one operation (read bytes, read text, stat, write,
//! inflate) on a resource addressed by URL. The [`ServiceBus`] hands it to an
//! ordered chain of handlers for that operation; each handler either answers
//! or forwards to the next one. This crate holds no handlers itself: the
//! filesystem, `data:` URL and HTTP handlers live in their own crates.
//!
//! # Example
//!
//! ```rust
//! use urlio_core::{handler_fn, Request, ServiceBus, StatSync, Stats, FileType, UrlParams, Url};
//!
//! let mut builder = ServiceBus::builder();
//! builder.register(handler_fn::<StatSync, _>("fixed size", |_request, _next, _bus| {
//!     Ok(Stats { size: 42, mtime: None, etag: None, file_type: FileType::File })
//! }));
//! let bus = builder.build();
//!
//! let url = Url::parse("file:///etc/hosts").unwrap();
//! let stats = bus.dispatch(Request::<StatSync>::new(UrlParams::new(url))).unwrap();
//! assert_eq!(stats.size, 42);
//! ```

pub use bytes::Bytes;

mod bus;
mod encoding;
mod error;
pub mod request;
pub mod resource;

pub use bus::{
    handler_fn, FnHandler, Handler, HandlerInfo, Next, ServiceBus, ServiceBusBuilder,
    MAX_DISPATCH_DEPTH,
};
pub use encoding::TextEncoding;
pub use error::Error;
pub use request::{
    BinaryFile, Deferred, FileReference, FileType, Inflate, InflateParams, ReadBinaryFile,
    ReadBinaryFileSync, ReadTextFile, ReadTextFileSync, Request, RequestKind, RequestParams,
    Response, Stat, StatSync, Stats, TextFile, TextParams, UrlParams, WriteFile, WriteParams,
};
pub use resource::{is_data_url, is_gz_file, is_http_url, to_url, url_to_file_path, Url};
