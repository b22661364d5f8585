use std::fs::{self, File};
use std::io;
use std::path::Path;

use filetime::{FileTime, set_file_times};
use filetools::platform::{NativeIo, PlatformIo};
use filetools::{CopyOptions, DurabilityMode, FileHandle, FileHandleError};
use tempfile::tempdir;

/// Opens like the native primitives but every write fails, as on a full disk.
struct FullDisk;

impl PlatformIo for FullDisk {
    fn open_for_read(path: &Path) -> io::Result<File> {
        NativeIo::open_for_read(path)
    }

    fn open_for_write(path: &Path) -> io::Result<File> {
        NativeIo::open_for_write(path)
    }

    fn write_buffer(_file: &mut File, _buf: &[u8]) -> io::Result<()> {
        Err(io::Error::other("no space left on device"))
    }
}

fn pattern(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
}

#[test]
fn copy_is_byte_exact_and_keeps_cursor() -> Result<(), Box<dyn std::error::Error>> {
    let td = tempdir()?;
    let src = td.path().join("src.bin");
    let dst = td.path().join("dst.bin");
    let data = pattern(3 * 4096 + 17);
    fs::write(&src, &data)?;

    let mut fh = FileHandle::open_path(&src)?;
    fh.seek_to(10)?;
    let res = fh.copy_to(&dst)?;

    assert_eq!(res.bytes, data.len() as u64);
    assert_eq!(res.buf_size, 4096);
    assert_eq!(res.mode, DurabilityMode::Data);
    assert_eq!(fs::read(&dst)?, data);

    // next read continues at offset 10
    assert_eq!(fh.position()?, 10);
    assert_eq!(fh.read_or_fail::<u8>()?, data[10]);
    Ok(())
}

#[test]
fn copy_truncates_existing_destination() -> Result<(), Box<dyn std::error::Error>> {
    let td = tempdir()?;
    let src = td.path().join("short.txt");
    let dst = td.path().join("long.txt");
    fs::write(&src, b"new")?;
    fs::write(&dst, b"much longer previous contents")?;

    let mut fh = FileHandle::open_path(&src)?;
    fh.copy_to(&dst)?;
    assert_eq!(fs::read(&dst)?, b"new");
    Ok(())
}

#[test]
fn unwritable_destination_fails_and_leaves_source_alone() -> Result<(), Box<dyn std::error::Error>> {
    let td = tempdir()?;
    let src = td.path().join("src.txt");
    fs::write(&src, b"0123456789abcdef")?;
    let dst = td.path().join("no").join("such").join("dir").join("out.txt");

    let mut fh = FileHandle::open_path(&src)?;
    fh.seek_to(5)?;
    let err = fh.copy_to(&dst).unwrap_err();
    assert!(matches!(err, FileHandleError::CopyDestinationUnwritable { .. }), "got {err:?}");
    assert!(!dst.exists());
    assert!(fh.is_open());
    assert_eq!(fh.position()?, 5);
    assert_eq!(fh.read_or_fail::<u8>()?, b'5');
    Ok(())
}

#[test]
fn custom_buffer_size_is_reported() -> Result<(), Box<dyn std::error::Error>> {
    let td = tempdir()?;
    let src = td.path().join("src.bin");
    let dst = td.path().join("dst.bin");
    let data = pattern(1000);
    fs::write(&src, &data)?;

    let mut fh = FileHandle::open_path(&src)?.with_copy_buffer_size(7);
    let res = fh.copy_to_with(
        &dst,
        CopyOptions {
            durability: DurabilityMode::Full,
            preserve_times: false,
        },
    )?;
    assert_eq!(res.buf_size, 7);
    assert_eq!(res.mode, DurabilityMode::Full);
    assert_eq!(fs::read(&dst)?, data);
    Ok(())
}

#[test]
fn preserve_times_option_carries_mtime() -> Result<(), Box<dyn std::error::Error>> {
    let td = tempdir()?;
    let src = td.path().join("old.txt");
    let dst = td.path().join("copy.txt");
    fs::write(&src, b"vintage")?;
    let ts = FileTime::from_unix_time(1_400_000_000, 0);
    set_file_times(&src, ts, ts)?;

    let mut fh = FileHandle::open_path(&src)?;
    fh.copy_to_with(
        &dst,
        CopyOptions {
            preserve_times: true,
            ..Default::default()
        },
    )?;
    let meta = fs::metadata(&dst)?;
    assert_eq!(FileTime::from_last_modification_time(&meta), ts);
    Ok(())
}

#[test]
fn empty_source_produces_empty_copy() -> Result<(), Box<dyn std::error::Error>> {
    let td = tempdir()?;
    let src = td.path().join("empty");
    let dst = td.path().join("empty.copy");
    fs::write(&src, b"")?;

    let mut fh = FileHandle::open_path(&src)?;
    assert_eq!(fh.copy_to(&dst)?.bytes, 0);
    assert_eq!(fs::metadata(&dst)?.len(), 0);
    Ok(())
}

#[cfg(unix)]
#[test]
fn hard_link_destination_is_refused() -> Result<(), Box<dyn std::error::Error>> {
    let td = tempdir()?;
    let src = td.path().join("src.bin");
    let alias = td.path().join("alias.bin");
    fs::write(&src, b"keep me intact")?;
    fs::hard_link(&src, &alias)?;

    let mut fh = FileHandle::open_path(&src)?;
    fh.seek_to(3)?;
    let err = fh.copy_to(&alias).unwrap_err();
    assert!(matches!(err, FileHandleError::CopyDestinationUnwritable { .. }), "got {err:?}");
    assert_eq!(fs::read(&src)?, b"keep me intact");
    assert_eq!(fh.position()?, 3);
    Ok(())
}

#[test]
fn copy_onto_itself_is_refused() -> Result<(), Box<dyn std::error::Error>> {
    let td = tempdir()?;
    let src = td.path().join("same.txt");
    fs::write(&src, b"payload")?;

    let mut fh = FileHandle::open_path(&src)?;
    let err = fh.copy_to(&src).unwrap_err();
    assert!(matches!(err, FileHandleError::CopyDestinationUnwritable { .. }), "got {err:?}");
    assert_eq!(fs::read(&src)?, b"payload");
    Ok(())
}

#[test]
fn failed_transfer_removes_partial_copy_and_restores_cursor() -> Result<(), Box<dyn std::error::Error>> {
    let td = tempdir()?;
    let src = td.path().join("src.bin");
    let dst = td.path().join("dst.bin");
    let data = pattern(2 * 4096);
    fs::write(&src, &data)?;

    let mut fh = FileHandle::open_path(&src)?;
    fh.seek_to(42)?;
    let err = fh.copy_to_with_io::<FullDisk>(&dst, CopyOptions::default()).unwrap_err();

    assert!(matches!(err, FileHandleError::Io { op: "copy", .. }), "got {err:?}");
    assert!(!dst.exists(), "partial destination should be removed");
    assert!(fh.is_open());
    assert_eq!(fh.position()?, 42);
    assert_eq!(fh.read_or_fail::<u8>()?, data[42]);
    assert_eq!(fs::read(&src)?, data);
    Ok(())
}

#[cfg(unix)]
#[test]
fn failed_transfer_leaves_non_regular_destination_in_place() -> Result<(), Box<dyn std::error::Error>> {
    let td = tempdir()?;
    let src = td.path().join("src.bin");
    let target = td.path().join("target.bin");
    let link = td.path().join("link.bin");
    fs::write(&src, b"abc")?;
    fs::write(&target, b"")?;
    std::os::unix::fs::symlink(&target, &link)?;

    let mut fh = FileHandle::open_path(&src)?;
    let err = fh.copy_to_with_io::<FullDisk>(&link, CopyOptions::default()).unwrap_err();
    assert!(matches!(err, FileHandleError::Io { op: "copy", .. }), "got {err:?}");
    assert!(fs::symlink_metadata(&link)?.file_type().is_symlink());
    assert!(target.exists());
    Ok(())
}
