//! I/O error helpers.
//!
//! Turns raw io::Error values into actionable messages with platform-aware hints.
//! Used by the binary when reporting handle failures and by config loading.
//!
//! Usage:
//!   // in functions returning anyhow::Result<_>
//!   fs::read_to_string(p).map_err(io_error_with_help("read config", p))?;

use anyhow::anyhow;
use std::io;
use std::path::Path;

/// Short remediation hint for a failed filesystem call, if one applies.
pub fn os_hint(e: &io::Error) -> Option<&'static str> {
    if let Some(code) = e.raw_os_error() {
        #[cfg(unix)]
        {
            let hint = match code {
                libc::EACCES | libc::EPERM => Some("permission denied; check ownership and permissions."),
                libc::EXDEV => Some("cross-filesystem; rename cannot move files between volumes."),
                libc::EBUSY => Some("resource busy; ensure no other process holds the file."),
                libc::ENOENT => Some("path not found; verify it exists."),
                libc::EEXIST => Some("already exists; pick a unique name or remove the target."),
                libc::EISDIR => Some("is a directory; expected a regular file."),
                libc::ENOTDIR => Some("a path component is not a directory."),
                libc::ENOSPC => Some("insufficient space on device."),
                libc::EROFS => Some("read-only filesystem; cannot write here."),
                libc::ELOOP => Some("too many symbolic link levels (ELOOP); possible symlink cycle."),
                libc::ENAMETOOLONG => Some("filename or path too long; shorten path segments."),
                libc::EMFILE => Some("process file descriptor limit reached; close files or raise limits."),
                libc::ENFILE => Some("system-wide file table overflow; reduce open files."),
                _ => None,
            };
            if hint.is_some() {
                return hint;
            }
        }
        #[cfg(windows)]
        {
            let hint = match code {
                5 => Some("access denied; check permissions."),            // ERROR_ACCESS_DENIED
                17 => Some("not same device; cross-filesystem move."),     // ERROR_NOT_SAME_DEVICE
                32 => Some("sharing violation; file is in use."),          // ERROR_SHARING_VIOLATION
                2 | 3 => Some("path not found; verify it exists."),        // FILE/PATH NOT FOUND
                80 | 183 => Some("already exists; pick a unique name."),   // ERROR_FILE_EXISTS / ALREADY_EXISTS
                112 => Some("insufficient disk space."),                   // ERROR_DISK_FULL
                19 => Some("write protected / read-only media."),          // ERROR_WRITE_PROTECT
                206 => Some("filename or path too long (MAX_PATH exceeded)."), // ERROR_FILENAME_EXCED_RANGE
                4 => Some("too many open files; close handles or increase limit."), // ERROR_TOO_MANY_OPEN_FILES
                _ => None,
            };
            if hint.is_some() {
                return hint;
            }
        }
        let _ = code;
    }

    match e.kind() {
        io::ErrorKind::PermissionDenied => Some("permission denied; check ownership and permissions."),
        io::ErrorKind::NotFound => Some("path not found; verify it exists."),
        io::ErrorKind::AlreadyExists => Some("already exists; remove or choose a unique name."),
        io::ErrorKind::UnexpectedEof => Some("file ended early; it may be truncated."),
        _ => None,
    }
}

/// Format a human-friendly message with op/path plus platform-aware hints.
fn build_message(op: &str, path: &Path, e: &io::Error) -> String {
    let mut msg = format!("{} '{}': {}", op, path.display(), e);
    if let Some(hint) = os_hint(e) {
        msg.push_str(" - ");
        msg.push_str(hint);
    }
    if let Some(code) = e.raw_os_error() {
        msg.push_str(&format!(" [os code: {}]", code));
    }
    msg
}

/// Adapter for anyhow::Result code.
/// Returns a closure suitable for `.map_err(...)` that converts io::Error -> anyhow::Error.
pub fn io_error_with_help<'a>(
    op: &'a str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> anyhow::Error + 'a {
    move |e: io::Error| anyhow!(build_message(op, path, &e))
}
