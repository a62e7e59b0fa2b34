//! # urlio-local
//!
//! Handlers that never leave the process.
//!
//! | Handler | Kind | Applies to |
//! |---|---|---|
//! | [`FsReadBinaryFile`], [`FsReadBinaryFileSync`] | binary read | `file:` |
//! | [`FsStat`], [`FsStatSync`] | stat | `file:` |
//! | [`FsWriteFile`] | write | `file:` |
//! | [`GzWriteFile`] | write | `*.gz` targets, then forwards |
//! | [`DataUrlRead`], [`DataUrlReadSync`] | binary read | `data:` |
//! | [`ReadTextViaBinary`], [`ReadTextViaBinarySync`] | text read | anything a binary read serves |
//! | [`GzInflate`] | inflate | - |
//!
//! Registration order matters; see `urlio::register_handlers` for the order
//! these are meant to be installed in.

pub mod compress;
pub mod data;
pub mod fs;
pub mod text;

pub use compress::{GzInflate, GzWriteFile};
pub use data::{DataUrlRead, DataUrlReadSync};
pub use fs::{FsReadBinaryFile, FsReadBinaryFileSync, FsStat, FsStatSync, FsWriteFile};
pub use text::{ReadTextViaBinary, ReadTextViaBinarySync};
