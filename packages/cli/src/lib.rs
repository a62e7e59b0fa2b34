//! The `urlio` command.
//!
//! Every subcommand takes locations that are either URLs (`file:`, `http:`,
//! `https:`, `data:`) or filesystem paths.

use std::io::{Read, Write};

use clap::{Parser, Subcommand};
use tracing::debug;

use urlio::{to_url, FileType, IoConfig, ResourceIo, Stats, TextEncoding};

#[derive(thiserror::Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Resource(#[from] urlio::Error),

    #[error("output error: {0}")]
    Output(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// urlio - read, write and stat files, HTTP resources and data: URLs
#[derive(Parser, Debug)]
#[command(name = "urlio")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// JSON configuration file (path or URL, may be gzip-compressed)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print a resource, inflating gzip content
    Cat {
        location: String,

        /// Text encoding of the content
        #[arg(short, long, default_value = "utf8")]
        encoding: TextEncoding,

        /// Copy the raw bytes instead of decoding text
        #[arg(long)]
        binary: bool,

        /// Use the blocking handlers
        #[arg(long)]
        sync: bool,
    },

    /// Print size, modification time and type of a resource as JSON
    Stat {
        location: String,

        /// Use the blocking handlers
        #[arg(long)]
        sync: bool,
    },

    /// Write stdin (or the content of --from) to a location; `.gz` targets
    /// are compressed
    Write {
        location: String,

        /// Read the content from this location instead of stdin
        #[arg(long)]
        from: Option<String>,
    },

    /// Gunzip a resource and print it as UTF-8
    Inflate { location: String },

    /// List the registered handlers in registration order
    Handlers,
}

/// Build the resource layer, applying `--config` when given.
///
/// The configuration file itself is read with default settings.
pub fn resource_io(config: Option<&str>) -> Result<ResourceIo, CliError> {
    let bootstrap = ResourceIo::new()?;
    let Some(location) = config else {
        return Ok(bootstrap);
    };

    let config = IoConfig::load(bootstrap.bus(), to_url(location)?)?;
    debug!(?config, "using config");
    Ok(ResourceIo::with_config(&config)?)
}

fn file_type_name(file_type: FileType) -> &'static str {
    match file_type {
        FileType::File => "file",
        FileType::Directory => "directory",
        FileType::SymbolicLink => "symlink",
        FileType::Unknown => "unknown",
    }
}

fn stats_json(stats: &Stats) -> serde_json::Value {
    serde_json::json!({
        "size": stats.size,
        "mtime": stats.mtime.map(|mtime| mtime.to_rfc3339()),
        "etag": stats.etag,
        "type": file_type_name(stats.file_type),
    })
}

pub async fn run(cli: Cli, out: &mut dyn Write) -> Result<(), CliError> {
    let io = resource_io(cli.config.as_deref())?;

    match cli.command {
        Command::Cat {
            location,
            encoding,
            binary,
            sync,
        } => {
            if binary {
                let file = if sync {
                    io.read_binary_file_sync(&location)?
                } else {
                    io.read_binary_file(&location).await?
                };
                out.write_all(&file.content)?;
            } else {
                let file = if sync {
                    io.read_file_sync(&location, encoding)?
                } else {
                    io.read_file(&location, encoding).await?
                };
                out.write_all(file.content.as_bytes())?;
            }
        }
        Command::Stat { location, sync } => {
            let stats = if sync {
                io.get_stat_sync(&location)?
            } else {
                io.get_stat(&location).await?
            };
            serde_json::to_writer_pretty(&mut *out, &stats_json(&stats))?;
            writeln!(out)?;
        }
        Command::Write { location, from } => {
            let content = match from {
                Some(source) => io.read_binary_file(&source).await?.content,
                None => {
                    let mut buffer = Vec::new();
                    std::io::stdin().read_to_end(&mut buffer)?;
                    buffer.into()
                }
            };
            let written = io.write_file(&location, content).await?;
            writeln!(out, "{}", written.url)?;
        }
        Command::Inflate { location } => {
            let file = io.read_binary_file(&location).await?;
            let text = io.inflate(file.content)?;
            out.write_all(text.as_bytes())?;
        }
        Command::Handlers => {
            for info in io.bus().handlers() {
                writeln!(out, "{:<20} {}", info.kind, info.description)?;
            }
        }
    }
    out.flush()?;
    Ok(())
}
