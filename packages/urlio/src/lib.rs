//! # urlio
//!
//! Read, write and stat resources by URL. Local files, `http:`/`https:`
//! resources and `data:` URLs all go through the same [`ServiceBus`], and
//! gzip content is handled transparently: `.gz` writes are compressed and
//! compressed reads are inflated when text is requested.
//!
//! ```rust,no_run
//! # async fn demo() -> Result<(), urlio::Error> {
//! use urlio::{ResourceIo, TextEncoding};
//!
//! let io = ResourceIo::new()?;
//! io.write_file("words.txt.gz", "alpha\nbeta\n").await?;
//! let text = io.read_file("words.txt.gz", TextEncoding::Utf8).await?;
//! assert!(text.gz);
//! # Ok(())
//! # }
//! ```
//!
//! To add handlers of your own, build the bus yourself:
//!
//! ```rust,no_run
//! use urlio::{register_handlers, IoConfig, ResourceIo, ServiceBus};
//!
//! let mut builder = ServiceBus::builder();
//! register_handlers(&mut builder, &IoConfig::default()).unwrap();
//! // builder.register(MyHandler);
//! let io = ResourceIo::with_bus(builder.build());
//! ```

mod config;
mod io;
mod registry;

pub use config::IoConfig;
pub use io::ResourceIo;
pub use registry::{default_bus, register_handlers};

pub use urlio_codec as codec;
pub use urlio_core::*;
pub use urlio_http::HttpConfig;
