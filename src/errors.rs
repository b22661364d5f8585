//! Typed error definitions for filetools.
//! Provides a small set of well-known failure modes for better logs and tests.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FileHandleError {
    #[error("File handle is not open")]
    NotOpen,

    #[error("Failed to open {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("End of file reached: needed {needed} bytes, only {available} available")]
    EndOfFile { needed: usize, available: usize },

    #[error("Failed to rename {from} -> {to}: {source}")]
    RenameFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Copy destination {path} cannot be created: {source}")]
    CopyDestinationUnwritable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("I/O error during {op}: {source}")]
    Io {
        op: &'static str,
        #[source]
        source: io::Error,
    },
}

impl FileHandleError {
    /// Stable short code for structured logs.
    pub fn code(&self) -> &'static str {
        match self {
            FileHandleError::NotOpen => "not_open",
            FileHandleError::OpenFailed { .. } => "open_failed",
            FileHandleError::EndOfFile { .. } => "end_of_file",
            FileHandleError::RenameFailed { .. } => "rename_failed",
            FileHandleError::CopyDestinationUnwritable { .. } => "copy_destination_unwritable",
            FileHandleError::Io { .. } => "io",
        }
    }

    pub(crate) fn io(op: &'static str) -> impl FnOnce(io::Error) -> Self {
        move |source| FileHandleError::Io { op, source }
    }
}

pub type Result<T, E = FileHandleError> = std::result::Result<T, E>;
