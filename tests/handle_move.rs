use std::fs;

use filetools::{FileHandle, FileHandleError};
use tempfile::tempdir;

#[test]
fn move_keeps_offset_and_relocates_file() -> Result<(), Box<dyn std::error::Error>> {
    let td = tempdir()?;
    let src = td.path().join("incoming.part.bin");
    let dest_dir = td.path().join("done");
    fs::create_dir_all(&dest_dir)?;
    let dst = dest_dir.join("final.dat");
    let data: Vec<u8> = (0u8..64).collect();
    fs::write(&src, &data)?;

    let mut fh = FileHandle::open_path(&src)?;
    fh.seek_to(20)?;
    fh.move_to(&dst)?;

    assert!(!src.exists(), "source should be gone");
    assert!(dst.exists(), "destination should exist");
    assert_eq!(fs::read(&dst)?, data);

    assert!(fh.is_open());
    assert_eq!(fh.path(), dst.as_path());
    assert_eq!(fh.base_name()?, "final");
    assert_eq!(fh.extension()?, ".dat");
    assert_eq!(fh.resolved_path()?, dunce::canonicalize(&dst)?.as_path());
    assert_eq!(fh.position()?, 20);
    assert_eq!(fh.read_or_fail::<u8>()?, 20);
    Ok(())
}

#[test]
fn failed_move_reopens_original_with_cursor() -> Result<(), Box<dyn std::error::Error>> {
    let td = tempdir()?;
    let src = td.path().join("stay.txt");
    fs::write(&src, b"abcdefghij")?;
    let dst = td.path().join("missing-dir").join("stay.txt");

    let mut fh = FileHandle::open_path(&src)?;
    fh.seek_to(4)?;
    let err = fh.move_to(&dst).unwrap_err();
    match &err {
        FileHandleError::RenameFailed { to, .. } => assert_eq!(to, &dst),
        other => panic!("expected RenameFailed, got {other:?}"),
    }

    assert!(src.exists());
    assert!(!dst.exists());
    assert!(fh.is_open());
    assert_eq!(fh.path(), src.as_path());
    assert_eq!(fh.base_name()?, "stay");
    assert_eq!(fh.position()?, 4);
    assert_eq!(fh.read_or_fail::<u8>()?, b'e');
    Ok(())
}

#[test]
fn move_on_closed_handle_is_rejected() {
    let td = tempdir().unwrap();
    let src = td.path().join("closed.txt");
    fs::write(&src, b"x").unwrap();
    let mut fh = FileHandle::new(&src);
    assert!(matches!(fh.move_to(td.path().join("y")), Err(FileHandleError::NotOpen)));
    assert!(src.exists());
}

#[test]
fn moved_handle_can_copy_afterwards() -> Result<(), Box<dyn std::error::Error>> {
    let td = tempdir()?;
    let a = td.path().join("a.log");
    let b = td.path().join("b.log");
    let c = td.path().join("c.log");
    fs::write(&a, b"payload")?;

    let mut fh = FileHandle::open_path(&a)?;
    fh.move_to(&b)?;
    fh.copy_to(&c)?;
    assert_eq!(fs::read(&b)?, b"payload");
    assert_eq!(fs::read(&c)?, b"payload");
    Ok(())
}

#[cfg(unix)]
#[test]
fn move_through_symlink_moves_the_link() -> Result<(), Box<dyn std::error::Error>> {
    let td = tempdir()?;
    let target = td.path().join("target.bin");
    let link = td.path().join("link.bin");
    let moved = td.path().join("moved-link.bin");
    fs::write(&target, b"0123456789")?;
    std::os::unix::fs::symlink(&target, &link)?;

    let mut fh = FileHandle::open_path(&link)?;
    fh.seek_to(6)?;
    fh.move_to(&moved)?;

    assert!(target.exists(), "link target stays where it was");
    assert!(fs::symlink_metadata(&link).is_err());
    assert!(fs::symlink_metadata(&moved)?.file_type().is_symlink());
    assert_eq!(fh.path(), moved.as_path());
    assert_eq!(fh.resolved_path()?, dunce::canonicalize(&target)?.as_path());
    assert_eq!(fh.position()?, 6);
    assert_eq!(fh.read_or_fail::<u8>()?, b'6');
    Ok(())
}
