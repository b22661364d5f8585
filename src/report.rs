//! Human-readable summary of an open handle (`filetools info`).

use std::fmt;
use std::path::PathBuf;

use crate::errors::Result;
use crate::handle::FileHandle;
use crate::metadata::{MetadataSnapshot, format_timestamp};
use crate::split::PathParts;

/// Everything `info` prints, captured from an open handle.
#[derive(Debug, Clone)]
pub struct FileReport {
    pub resolved: PathBuf,
    pub parts: PathParts,
    pub metadata: MetadataSnapshot,
}

impl FileReport {
    pub fn from_handle(handle: &FileHandle) -> Result<Self> {
        Ok(Self {
            resolved: handle.resolved_path()?.to_path_buf(),
            parts: handle.parts()?.clone(),
            metadata: *handle.metadata()?,
        })
    }
}

/// Size expressed in bytes and binary KB / MB / GB.
pub fn size_breakdown(bytes: u64) -> (f64, f64, f64) {
    let kb = bytes as f64 / 1024.0;
    let mb = kb / 1024.0;
    let gb = mb / 1024.0;
    (kb, mb, gb)
}

impl fmt::Display for FileReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = &self.metadata;
        let (kb, mb, gb) = size_breakdown(m.size);
        writeln!(f, "Absolute path of file")?;
        writeln!(f, "\t -- {}", self.resolved.display())?;
        writeln!(f, "Drive letter and Directory")?;
        writeln!(f, "\t -- {},{}", self.parts.drive, self.parts.directory)?;
        writeln!(f, "Filename and Extension")?;
        writeln!(f, "\t -- {},{}", self.parts.base_name, self.parts.extension)?;
        writeln!(f, "File size")?;
        writeln!(f, "\t -- byte(s) : {} byte(s)", m.size)?;
        writeln!(f, "\t -- kilobyte(s) : {kb} KB")?;
        writeln!(f, "\t -- megabyte(s) : {mb} MB")?;
        writeln!(f, "\t -- gigabyte(s) : {gb} GB")?;
        writeln!(f, "Created on")?;
        writeln!(f, "\t -- unix_timestamp({})\t{}", m.create_time, format_timestamp(m.create_time))?;
        writeln!(f, "Modified on")?;
        writeln!(f, "\t -- unix_timestamp({})\t{}", m.modify_time, format_timestamp(m.modify_time))?;
        writeln!(f, "Accessed on")?;
        writeln!(f, "\t -- unix_timestamp({})\t{}", m.access_time, format_timestamp(m.access_time))?;
        write!(
            f,
            "File is owned by UID({}), GROUP({})",
            m.owner_user_id, m.owner_group_id
        )
    }
}

/// Classic 16-bytes-per-line hex dump; `start` is the file offset of `bytes[0]`.
pub fn hex_dump(start: u64, bytes: &[u8]) -> String {
    let mut out = String::new();
    for (i, chunk) in bytes.chunks(16).enumerate() {
        let offset = start + (i * 16) as u64;
        let hex: Vec<String> = chunk.iter().map(|b| format!("{b:02x}")).collect();
        let ascii: String = chunk
            .iter()
            .map(|&b| if b.is_ascii_graphic() || b == b' ' { b as char } else { '.' })
            .collect();
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&format!("{offset:08x}  {:<47}  |{ascii}|", hex.join(" ")));
    }
    out
}
