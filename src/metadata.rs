//! Metadata snapshot captured when a file is opened.
//! - Holds size, the three timestamps (Unix epoch seconds) and owner ids.
//! - A failed stat is not fatal: the snapshot degrades to all zeroes.
//! - Never refreshed behind the caller's back.

use chrono::{DateTime, Utc};
use std::fs;
use std::path::Path;
use tracing::{trace, warn};

use crate::platform;

/// Layout used for human-readable timestamps (UTC).
pub const TIMESTAMP_FORMAT: &str = "%d.%m.%Y %H:%M:%S";
/// Returned when a timestamp cannot be represented as a calendar date.
pub const TIMESTAMP_FALLBACK: &str = "1970-01-01 00:00:00";

/// Point-in-time copy of OS-reported file attributes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetadataSnapshot {
    pub size: u64,
    pub modify_time: i64,
    /// Unix: status change time (`st_ctime`). Windows: creation time.
    pub create_time: i64,
    pub access_time: i64,
    pub owner_user_id: u32,
    pub owner_group_id: u32,
}

impl MetadataSnapshot {
    /// Stat `path`; on failure log a warning and return a zeroed snapshot.
    pub fn capture(path: &Path) -> Self {
        match fs::metadata(path) {
            Ok(meta) => {
                let snap = Self::from(&meta);
                trace!(path = %path.display(), size = snap.size, "captured metadata snapshot");
                snap
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "metadata unavailable; using zeroed snapshot");
                Self::default()
            }
        }
    }

    pub fn modify_time_string(&self) -> String {
        format_timestamp(self.modify_time)
    }

    pub fn create_time_string(&self) -> String {
        format_timestamp(self.create_time)
    }

    pub fn access_time_string(&self) -> String {
        format_timestamp(self.access_time)
    }
}

impl From<&fs::Metadata> for MetadataSnapshot {
    fn from(meta: &fs::Metadata) -> Self {
        let times = platform::file_times(meta);
        let (uid, gid) = platform::owner_ids(meta);
        Self {
            size: meta.len(),
            modify_time: times.modified,
            create_time: times.created,
            access_time: times.accessed,
            owner_user_id: uid,
            owner_group_id: gid,
        }
    }
}

/// Format epoch seconds as `DD.MM.YYYY HH:MM:SS` in UTC.
/// Out-of-range values yield [`TIMESTAMP_FALLBACK`].
pub fn format_timestamp(secs: i64) -> String {
    DateTime::<Utc>::from_timestamp(secs, 0)
        .map(|dt| dt.format(TIMESTAMP_FORMAT).to_string())
        .unwrap_or_else(|| TIMESTAMP_FALLBACK.to_string())
}
