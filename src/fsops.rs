//! Filesystem helpers used by the traversal, extraction and retention code.
//!
//! These are thin wrappers over `std::fs` that turn platform faults into
//! [`Result`] values (or plain `false` for the predicates), so callers decide
//! whether a failure aborts the operation or is reported and skipped.

use std::fs;
use std::io;
use std::path::{MAIN_SEPARATOR, Path, PathBuf};

use filetime::FileTime;
use walkdir::WalkDir;

use crate::{Error, Result};

/// Removes one trailing separator, if present.
///
/// `create_dir` on some platforms reports failure for a path that ends in a
/// separator even though the directory was created.
fn trim_trailing_separator(path: &Path) -> PathBuf {
    let s = path.to_string_lossy();
    let trimmed = s
        .strip_suffix('/')
        .or_else(|| if cfg!(windows) { s.strip_suffix('\\') } else { None });
    match trimmed {
        Some(t) if !t.is_empty() => PathBuf::from(t),
        _ => path.to_path_buf(),
    }
}

/// Creates a single directory.
///
/// Succeeds if the directory already exists. The parent must exist; use
/// [`create_directories`] to create a full path.
pub fn create_folder(path: impl AsRef<Path>) -> Result<()> {
    let path = trim_trailing_separator(path.as_ref());
    if path.is_dir() {
        return Ok(());
    }
    match fs::create_dir(&path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists && path.is_dir() => Ok(()),
        Err(e) => Err(Error::Io(e)),
    }
}

/// Creates a directory and all of its missing parents.
///
/// Idempotent: an already existing directory is not an error.
pub fn create_directories(path: impl AsRef<Path>) -> Result<()> {
    let path = trim_trailing_separator(path.as_ref());
    fs::create_dir_all(&path)?;
    Ok(())
}

/// Returns `true` if `path` exists and is a directory (symlinks are followed).
pub fn is_directory(path: impl AsRef<Path>) -> bool {
    fs::metadata(path.as_ref())
        .map(|m| m.is_dir())
        .unwrap_or(false)
}

/// Returns `true` if `path` exists and is a regular file (symlinks are followed).
pub fn is_file(path: impl AsRef<Path>) -> bool {
    fs::metadata(path.as_ref())
        .map(|m| m.is_file())
        .unwrap_or(false)
}

/// Returns the directory part of a file path, terminated by a separator.
///
/// The separator appended is `/` when the input already uses `/`, otherwise
/// the platform separator.
///
/// ```rust
/// assert_eq!(dirzip::fsops::parent_dir("/tmp/data/file.txt"), "/tmp/data/");
/// assert_eq!(dirzip::fsops::parent_dir("file.txt"), format!("{}", std::path::MAIN_SEPARATOR));
/// ```
pub fn parent_dir(path: impl AsRef<Path>) -> String {
    let raw = path.as_ref().to_string_lossy().into_owned();
    let mut dir = match raw.rfind(|c: char| c == '/' || (cfg!(windows) && c == '\\')) {
        Some(idx) => raw[..idx].to_string(),
        None => String::new(),
    };
    if raw.contains('/') {
        dir.push('/');
    } else {
        dir.push(MAIN_SEPARATOR);
    }
    dir
}

/// Renames a file or directory.
pub fn rename(from: impl AsRef<Path>, to: impl AsRef<Path>) -> Result<()> {
    fs::rename(from.as_ref(), to.as_ref())?;
    Ok(())
}

/// Deletes a file (or a symlink, without following it).
///
/// Returns `Ok(false)` if nothing existed at `path`.
pub fn erase_file(path: impl AsRef<Path>) -> Result<bool> {
    match fs::remove_file(path.as_ref()) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(Error::Io(e)),
    }
}

/// Recursively deletes a directory and everything below it.
///
/// Returns the number of filesystem objects removed, the directory itself
/// included. A path that does not exist removes nothing and returns `Ok(0)`.
pub fn erase_folder(path: impl AsRef<Path>) -> Result<u64> {
    let path = path.as_ref();
    let meta = match fs::symlink_metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
        Err(e) => return Err(Error::Io(e)),
    };
    if !meta.is_dir() {
        fs::remove_file(path)?;
        return Ok(1);
    }

    let mut removed = 0u64;
    for entry in WalkDir::new(path).contents_first(true) {
        let entry = entry.map_err(io::Error::from)?;
        if entry.file_type().is_dir() {
            fs::remove_dir(entry.path())?;
        } else {
            fs::remove_file(entry.path())?;
        }
        removed += 1;
    }
    Ok(removed)
}

/// Returns the size in bytes of a regular file.
pub fn file_size(path: impl AsRef<Path>) -> Result<u64> {
    let path = path.as_ref();
    let meta = fs::metadata(path)?;
    if !meta.is_file() {
        return Err(Error::NotAFile {
            path: path.to_path_buf(),
        });
    }
    Ok(meta.len())
}

/// Returns the last modification time as seconds since the Unix epoch.
pub fn last_write_time(path: impl AsRef<Path>) -> Result<i64> {
    let meta = fs::metadata(path.as_ref())?;
    Ok(FileTime::from_last_modification_time(&meta).unix_seconds())
}
