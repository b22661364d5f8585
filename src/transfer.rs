//! Buffered transfer loop behind `FileHandle::copy_to`.
//!
//! Features:
//! - Fixed-size chunks (4 KiB by default) read from the source until a read returns zero.
//! - Optional full fsync of the destination for stronger durability.
//! - Best-effort timestamp preservation onto the finished copy.
//!
//! Snapshot semantics: the source is read once from offset 0 to EOF; bytes appended
//! concurrently after EOF was observed are not included.

use filetime::{FileTime, set_file_times};
use std::fs::{self, File};
use std::io::{self, Seek, SeekFrom};
use std::path::Path;
use tracing::{trace, warn};

use crate::platform::PlatformIo;

/// Chunk size used when none is configured.
pub const DEFAULT_COPY_BUFFER_SIZE: usize = 4096;

/// Durability mode controlling post-write flush behavior.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DurabilityMode {
    /// Written data is handed to the OS page cache; no disk barrier.
    #[default]
    Data,
    /// Force data and metadata to stable storage (`sync_all`).
    Full,
}

/// Knobs for [`crate::FileHandle::copy_to_with`].
#[derive(Clone, Copy, Debug, Default)]
pub struct CopyOptions {
    pub durability: DurabilityMode,
    /// Carry the source's access/modification times over to the copy.
    pub preserve_times: bool,
}

/// Result of a buffered copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyResult {
    /// Total bytes copied from source to destination.
    pub bytes: u64,
    /// Chunk size used for the transfer.
    pub buf_size: usize,
    pub mode: DurabilityMode,
}

/// Rewind `src` and stream it into `dst` in `buf_size` chunks.
/// The caller owns cursor restoration on `src`.
pub(crate) fn copy_stream<I: PlatformIo>(
    src: &mut File,
    dst: &mut File,
    buf_size: usize,
    mode: DurabilityMode,
) -> io::Result<u64> {
    src.seek(SeekFrom::Start(0))?;

    let mut buf = vec![0u8; buf_size.max(1)];
    let mut total: u64 = 0;
    loop {
        let n = I::read_buffer(src, &mut buf)?;
        if n == 0 {
            break;
        }
        I::write_buffer(dst, &buf[..n])?;
        total += n as u64;
        trace!(chunk = n, total, "transferred chunk");
    }

    if matches!(mode, DurabilityMode::Full) {
        dst.sync_all()?;
    }
    Ok(total)
}

/// Copy atime/mtime from `src` to `dest`. Failures are logged and ignored.
pub(crate) fn preserve_times(src: &Path, dest: &Path) {
    let meta = match fs::metadata(src) {
        Ok(m) => m,
        Err(e) => {
            warn!(path = %src.display(), error = %e, "failed to stat source for timestamp preservation");
            return;
        }
    };
    let at = FileTime::from_last_access_time(&meta);
    let mt = FileTime::from_last_modification_time(&meta);
    if let Err(e) = set_file_times(dest, at, mt) {
        warn!(path = %dest.display(), error = %e, "failed to set atime/mtime on destination");
    } else {
        trace!(path = %dest.display(), "set atime/mtime on destination");
    }
}
