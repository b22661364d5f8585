//! Windows implementations of platform helpers (best-effort).
//!
//! Notes:
//! - Windows has no owner uid/gid in std metadata; both report 0.
//! - `created` is the real creation time, unlike Unix where it is ctime.

use std::fs::{File, Metadata, OpenOptions};
use std::io;
use std::os::windows::fs::OpenOptionsExt;
use std::path::Path;
use std::time::SystemTime;

use super::{FileTimes, PlatformIo, system_time_secs};

const FILE_FLAG_SEQUENTIAL_SCAN: u32 = 0x0800_0000;

/// Windows stream primitives.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeIo;

impl PlatformIo for NativeIo {
    fn open_for_read(path: &Path) -> io::Result<File> {
        OpenOptions::new()
            .read(true)
            .custom_flags(FILE_FLAG_SEQUENTIAL_SCAN)
            .open(path)
    }

    fn open_for_write(path: &Path) -> io::Result<File> {
        OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
    }
}

fn secs_or_zero(res: io::Result<SystemTime>) -> i64 {
    res.map(system_time_secs).unwrap_or(0)
}

pub fn file_times(meta: &Metadata) -> FileTimes {
    FileTimes {
        modified: secs_or_zero(meta.modified()),
        created: secs_or_zero(meta.created()),
        accessed: secs_or_zero(meta.accessed()),
    }
}

pub fn owner_ids(_meta: &Metadata) -> (u32, u32) {
    (0, 0)
}

/// File identity is not exposed by std metadata here; callers fall back to
/// comparing canonical paths.
pub fn same_file(_a: &Metadata, _b: &Metadata) -> bool {
    false
}

/// Open log file for appending (best-effort; no symlink defense available via std on Windows).
pub fn open_log_file_secure_append(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    OpenOptions::new().create(true).append(true).open(path)
}
