//! Unix implementations of platform helpers.

use std::fs::{self, File, Metadata, OpenOptions};
use std::io;
use std::os::unix::fs::{MetadataExt, OpenOptionsExt, PermissionsExt};
use std::path::Path;

use super::{FileTimes, PlatformIo};

/// Unix stream primitives (plain `open(2)` with `fopen`-compatible modes).
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeIo;

impl PlatformIo for NativeIo {
    fn open_for_read(path: &Path) -> io::Result<File> {
        OpenOptions::new()
            .read(true)
            .custom_flags(libc::O_NOCTTY)
            .open(path)
    }

    fn open_for_write(path: &Path) -> io::Result<File> {
        // 0666 before umask, same as fopen(path, "wb")
        OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o666)
            .open(path)
    }
}

/// mtime / ctime / atime straight from `struct stat`.
pub fn file_times(meta: &Metadata) -> FileTimes {
    FileTimes {
        modified: meta.mtime(),
        created: meta.ctime(),
        accessed: meta.atime(),
    }
}

/// Owning user and group ids.
pub fn owner_ids(meta: &Metadata) -> (u32, u32) {
    (meta.uid(), meta.gid())
}

/// Same device and inode: both paths reach one file (hard links included).
pub fn same_file(a: &Metadata, b: &Metadata) -> bool {
    a.dev() == b.dev() && a.ino() == b.ino()
}

/// Open log file for appending; set 0600 only when creating a new file.
/// If the file already exists, we preserve its existing permissions.
pub fn open_log_file_secure_append(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let existed = path.exists();
    let f = OpenOptions::new()
        .create(true)
        .append(true)
        .mode(0o600) // applies on create
        .open(path)?;
    if !existed {
        let _ = fs::set_permissions(path, fs::Permissions::from_mode(0o600));
    }
    Ok(f)
}
