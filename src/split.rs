//! Path decomposition into drive / directory / base name / extension.
//!
//! Two splitters share one capability: `PosixSplitter` (no drive, `/` separator)
//! and `WindowsSplitter` (drive letter or UNC share, `\` and `/` separators).
//! `NativeSplitter` picks the one matching the build target.
//!
//! Extension policy, shared by both splitters:
//! - the extension starts at the last `.` of the final segment and keeps the dot
//!   (`archive.tar.gz` -> `archive.tar` + `.gz`);
//! - a dot in first position belongs to the name (`.gitignore` -> `.gitignore` + ``);
//! - a trailing dot is an extension of its own (`name.` -> `name` + `.`);
//! - no dot at all yields an empty extension.

use std::path::Path;

/// Result of splitting an absolute path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParts {
    /// Logical drive (`C:` or `\\server\share`); empty on POSIX.
    pub drive: String,
    pub directory: String,
    pub base_name: String,
    /// Includes the leading dot; empty when the name has none.
    pub extension: String,
}

/// Platform path-splitting capability.
pub trait PathSplitter {
    fn split(path: &str) -> PathParts;
}

/// POSIX rules: `dirname`/`basename` style, never a drive.
#[derive(Debug, Clone, Copy, Default)]
pub struct PosixSplitter;

/// Windows rules modelled on `_splitpath`: the directory keeps its trailing separator.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowsSplitter;

#[cfg(windows)]
pub type NativeSplitter = WindowsSplitter;
#[cfg(not(windows))]
pub type NativeSplitter = PosixSplitter;

/// Split `path` with the splitter native to this build.
pub fn split_path(path: &Path) -> PathParts {
    NativeSplitter::split(&path.to_string_lossy())
}

fn split_extension(file_name: &str) -> (String, String) {
    match file_name.rfind('.') {
        Some(idx) if idx > 0 => (
            file_name[..idx].to_string(),
            file_name[idx..].to_string(),
        ),
        _ => (file_name.to_string(), String::new()),
    }
}

impl PathSplitter for PosixSplitter {
    fn split(path: &str) -> PathParts {
        let (directory, file_name) = match path.rfind('/') {
            None => (".", path),
            Some(0) => ("/", &path[1..]),
            Some(idx) => (&path[..idx], &path[idx + 1..]),
        };
        let (base_name, extension) = split_extension(file_name);
        PathParts {
            drive: String::new(),
            directory: directory.to_string(),
            base_name,
            extension,
        }
    }
}

#[inline]
fn is_win_sep(c: char) -> bool {
    c == '\\' || c == '/'
}

/// Length in bytes of the drive prefix (`C:` or `\\server\share`), 0 if none.
fn windows_drive_len(path: &str) -> usize {
    let bytes = path.as_bytes();
    if bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' {
        return 2;
    }
    let mut chars = path.char_indices();
    let unc = matches!(
        (chars.next(), chars.next()),
        (Some((_, a)), Some((_, b))) if is_win_sep(a) && is_win_sep(b)
    );
    if !unc {
        return 0;
    }
    // \\server\share: stop at the separator after the share component
    let after_prefix = &path[2..];
    let Some(server_end) = after_prefix.find(is_win_sep) else {
        return path.len();
    };
    let share_start = 2 + server_end + 1;
    match path[share_start..].find(is_win_sep) {
        Some(share_end) => share_start + share_end,
        None => path.len(),
    }
}

impl PathSplitter for WindowsSplitter {
    fn split(path: &str) -> PathParts {
        let drive_len = windows_drive_len(path);
        let (drive, rest) = path.split_at(drive_len);
        let (directory, file_name) = match rest.rfind(is_win_sep) {
            Some(idx) => rest.split_at(idx + 1),
            None => ("", rest),
        };
        let (base_name, extension) = split_extension(file_name);
        PathParts {
            drive: drive.to_string(),
            directory: directory.to_string(),
            base_name,
            extension,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(drive: &str, directory: &str, base: &str, ext: &str) -> PathParts {
        PathParts {
            drive: drive.into(),
            directory: directory.into(),
            base_name: base.into(),
            extension: ext.into(),
        }
    }

    #[test]
    fn posix_regular_file() {
        assert_eq!(
            PosixSplitter::split("/home/user/report.pdf"),
            parts("", "/home/user", "report", ".pdf")
        );
    }

    #[test]
    fn posix_root_level_and_bare_names() {
        assert_eq!(PosixSplitter::split("/vmlinuz"), parts("", "/", "vmlinuz", ""));
        assert_eq!(PosixSplitter::split("notes.txt"), parts("", ".", "notes", ".txt"));
    }

    #[test]
    fn extension_policy_multi_and_leading_dots() {
        assert_eq!(
            PosixSplitter::split("/srv/archive.tar.gz"),
            parts("", "/srv", "archive.tar", ".gz")
        );
        assert_eq!(
            PosixSplitter::split("/repo/.gitignore"),
            parts("", "/repo", ".gitignore", "")
        );
        assert_eq!(
            PosixSplitter::split("/repo/.config.bak"),
            parts("", "/repo", ".config", ".bak")
        );
        assert_eq!(PosixSplitter::split("/tmp/name."), parts("", "/tmp", "name", "."));
    }

    #[test]
    fn windows_drive_letter() {
        assert_eq!(
            WindowsSplitter::split(r"C:\Users\dave\game.bin"),
            parts("C:", r"\Users\dave\", "game", ".bin")
        );
        assert_eq!(WindowsSplitter::split(r"d:file.txt"), parts("d:", "", "file", ".txt"));
    }

    #[test]
    fn windows_unc_share_is_the_drive() {
        assert_eq!(
            WindowsSplitter::split(r"\\nas\media\films\clip.mkv"),
            parts(r"\\nas\media", r"\films\", "clip", ".mkv")
        );
        assert_eq!(WindowsSplitter::split(r"\\nas\media"), parts(r"\\nas\media", "", "", ""));
    }

    #[test]
    fn windows_mixed_separators_and_no_drive() {
        assert_eq!(
            WindowsSplitter::split(r"dir/sub\data.tar.gz"),
            parts("", r"dir/sub\", "data.tar", ".gz")
        );
        assert_eq!(WindowsSplitter::split(".env"), parts("", "", ".env", ""));
    }

    #[cfg(unix)]
    #[test]
    fn native_splitter_is_posix_on_unix() {
        let p = split_path(Path::new("/a/b.c"));
        assert_eq!(p, parts("", "/a", "b", ".c"));
    }
}
