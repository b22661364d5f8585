//! Default path helpers and symlink checks.

use anyhow::{Result, anyhow};
use dirs::config_dir;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::CONFIG_ENV;

/// Config file location: `$FILETOOLS_CONFIG` when set, else
/// `<config_dir>/filetools/config.xml` (falling back to `$HOME/.config`).
pub fn default_config_path() -> Result<PathBuf> {
    if let Some(p) = env::var_os(CONFIG_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(p));
    }
    if let Some(mut base) = config_dir() {
        base.push("filetools");
        base.push("config.xml");
        return Ok(base);
    }
    env::var_os("HOME")
        .map(|h| {
            PathBuf::from(h)
                .join(".config")
                .join("filetools")
                .join("config.xml")
        })
        .ok_or_else(|| anyhow!("cannot determine a config directory (no config dir, no HOME)"))
}

/// Return true if any existing ancestor of `path` is a symlink.
pub fn path_has_symlink_ancestor(path: &Path) -> io::Result<bool> {
    let mut p = path.parent();
    while let Some(anc) = p {
        if anc.exists() {
            let meta = fs::symlink_metadata(anc)?;
            if meta.file_type().is_symlink() {
                return Ok(true);
            }
        }
        p = anc.parent();
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn plain_tempdir_has_no_symlink_ancestor() {
        let td = tempdir().unwrap();
        let base = dunce::canonicalize(td.path()).unwrap();
        assert!(!path_has_symlink_ancestor(&base.join("a").join("b.log")).unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn detects_symlinked_parent() {
        let td = tempdir().unwrap();
        let real = td.path().join("real");
        fs::create_dir(&real).unwrap();
        let link = td.path().join("link");
        std::os::unix::fs::symlink(&real, &link).unwrap();
        assert!(path_has_symlink_ancestor(&link.join("x.log")).unwrap());
    }
}
