//! Core library for `filetools`.
//!
//! A single-file handle that couples an open read stream with the file's
//! split path (drive, directory, base name, extension) and a metadata
//! snapshot, plus typed/raw reads and cursor-preserving move and copy.
//!
//! ```no_run
//! use filetools::FileHandle;
//!
//! let mut fh = FileHandle::open_path("data.bin")?;
//! let magic: u32 = fh.read_or_fail()?;
//! fh.copy_to("data.bak")?;
//! println!("{} bytes, magic {magic:#x}", fh.size()?);
//! # Ok::<(), filetools::FileHandleError>(())
//! ```

pub mod cli;
pub mod config;
pub mod errors;
pub mod handle;
pub mod helpers;
pub mod metadata;
pub mod output;
pub mod platform;
pub mod pod;
pub mod report;
pub mod split;
pub mod transfer;

pub use config::{Config, LogLevel, default_config_path};
pub use errors::FileHandleError;
pub use handle::FileHandle;
pub use metadata::{MetadataSnapshot, format_timestamp};
pub use pod::NativeValue;
pub use report::FileReport;
pub use split::{NativeSplitter, PathParts, PathSplitter, PosixSplitter, WindowsSplitter};
pub use transfer::{CopyOptions, CopyResult, DEFAULT_COPY_BUFFER_SIZE, DurabilityMode};
