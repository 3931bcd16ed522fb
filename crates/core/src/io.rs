//! Filesystem helpers shared by the fetcher and the driver.

use std::{
    fs::{create_dir_all, write},
    path::{Path, PathBuf},
};

use glob::glob;

use crate::error::{Error, Result};

/// Create a directory and its parents; existing directories are fine.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    create_dir_all(dir).map_err(|e| Error::io(dir, e))
}

/// Write bytes to a file, replacing any previous content.
pub fn write_file(path: &Path, data: impl AsRef<[u8]>) -> Result<()> {
    write(path, data).map_err(|e| Error::io(path, e))
}

/// Write a script and mark it executable.
pub fn write_executable(path: &Path, data: impl AsRef<[u8]>) -> Result<()> {
    write_file(path, data)?;
    #[cfg(unix)]
    {
        use std::{
            fs::{Permissions, set_permissions},
            os::unix::fs::PermissionsExt,
        };
        set_permissions(path, Permissions::from_mode(0o755)).map_err(|e| Error::io(path, e))?;
    }
    Ok(())
}

/// Font files (`.ttf`, `.otf`) directly inside a directory, sorted.
pub fn glob_fonts(dir: &Path) -> Vec<PathBuf> {
    let mut fonts: Vec<PathBuf> = ["*.ttf", "*.otf"]
        .iter()
        .filter_map(|pattern| {
            let pattern = dir.join(pattern);
            glob(pattern.to_str()?).ok()
        })
        .flat_map(|paths| paths.filter_map(|p| p.ok()))
        .collect();
    fonts.sort();
    fonts
}

#[cfg(test)]
mod tests {
    use std::fs::read;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_ensure_dir_is_idempotent() {
        let tmp = tempdir().unwrap();
        let dir = tmp.path().join("a/b");
        ensure_dir(&dir).unwrap();
        ensure_dir(&dir).unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn test_write_file_overwrites() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("font-patcher");
        write_executable(&path, b"old").unwrap();
        write_executable(&path, b"new").unwrap();
        assert_eq!(read(&path).unwrap(), b"new");
    }

    #[cfg(unix)]
    #[test]
    fn test_write_executable_sets_mode() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempdir().unwrap();
        let path = tmp.path().join("font-patcher");
        write_executable(&path, b"#!/usr/bin/env python\n").unwrap();
        let mode = path.metadata().unwrap().permissions().mode();
        assert_eq!(mode & 0o111, 0o111);
    }

    #[test]
    fn test_glob_fonts() {
        let tmp = tempdir().unwrap();
        for name in ["b.ttf", "a.otf", "notes.txt"] {
            write_file(&tmp.path().join(name), b"").unwrap();
        }
        let fonts = glob_fonts(tmp.path());
        assert_eq!(fonts, vec![tmp.path().join("a.otf"), tmp.path().join("b.ttf")]);
    }
}
