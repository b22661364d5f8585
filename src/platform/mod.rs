//! Platform-specific helpers.
//! This module hides OS differences (Unix/Windows) behind a uniform API so
//! the rest of the codebase can remain platform-agnostic.
//!
//! - `PlatformIo`: the four raw stream primitives the file handle is built on.
//! - `file_times` / `owner_ids`: stat fields that only some platforms report.
//! - `same_file`: file identity, where the platform exposes it.
//! - `open_log_file_secure_append`: log sink used by the binary.

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

#[cfg(unix)]
mod unix;
#[cfg(not(unix))]
mod windows;

#[cfg(unix)]
pub use unix::{NativeIo, file_times, open_log_file_secure_append, owner_ids, same_file};

#[cfg(not(unix))]
pub use windows::{NativeIo, file_times, open_log_file_secure_append, owner_ids, same_file};

/// Epoch-second timestamps as reported by the platform's stat call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileTimes {
    pub modified: i64,
    pub created: i64,
    pub accessed: i64,
}

/// Raw stream primitives. Implementations only differ in how files are opened;
/// reading and writing share the default loops.
pub trait PlatformIo {
    /// Open an existing file for binary reading.
    fn open_for_read(path: &Path) -> io::Result<File>;

    /// Create (or truncate) a file for binary writing.
    fn open_for_write(path: &Path) -> io::Result<File>;

    /// Fill `buf` as far as the stream allows; a short count means end of file.
    fn read_buffer(file: &mut File, buf: &mut [u8]) -> io::Result<usize> {
        let mut filled = 0;
        while filled < buf.len() {
            match file.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(filled)
    }

    /// Write all of `buf`.
    fn write_buffer(file: &mut File, buf: &[u8]) -> io::Result<()> {
        file.write_all(buf)
    }
}

/// Seconds since the epoch for a `SystemTime`, negative before 1970.
#[cfg_attr(unix, allow(dead_code))]
pub(crate) fn system_time_secs(t: std::time::SystemTime) -> i64 {
    match t.duration_since(std::time::UNIX_EPOCH) {
        Ok(d) => d.as_secs() as i64,
        Err(e) => -(e.duration().as_secs() as i64),
    }
}
