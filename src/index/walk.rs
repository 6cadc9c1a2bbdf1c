//! Directory traversal feeding a [`RoleIndex`].
//!
//! The walk never follows symbolic links into other trees. A symlink is
//! classified by its target: a link to a directory counts as a folder, a link
//! to a regular file counts as a file, and a dangling link is skipped. Nodes
//! that cannot be read (permission errors, entries vanishing mid-walk) are
//! skipped as well; both cases are logged and counted in
//! [`RoleIndex::skipped`].
//!
//! Names that are not valid UTF-8 are indexed under an escaped string (see
//! [`path_string`]); the untouched path is kept in [`PathEntry::native`].

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use super::{ListOptions, PathEntry, Role, RoleIndex};
use crate::fsops;

/// Rewrites a root path into the platform-preferred separator form.
fn preferred_root(root: &Path) -> PathBuf {
    if cfg!(windows) {
        PathBuf::from(root.to_string_lossy().replace('/', "\\"))
    } else {
        root.to_path_buf()
    }
}

/// Renders a path as the string the index maps are keyed by.
///
/// Valid UTF-8 is kept as is. On Unix every byte that is not part of a valid
/// UTF-8 sequence is written as `%XX`, so names that differ only in such
/// bytes stay distinct.
#[cfg(unix)]
pub fn path_string(path: &Path) -> String {
    use std::fmt::Write;
    use std::os::unix::ffi::OsStrExt;

    let bytes = path.as_os_str().as_bytes();
    let mut out = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        out.push_str(chunk.valid());
        for byte in chunk.invalid() {
            let _ = write!(out, "%{:02X}", byte);
        }
    }
    out
}

/// Renders a path as the string the index maps are keyed by.
#[cfg(not(unix))]
pub fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Number of leading bytes to strip from an absolute path to get the
/// relative path under `root`.
pub(crate) fn prefix_len(root: &str) -> usize {
    let ends_with_separator = root.ends_with('/') || (cfg!(windows) && root.ends_with('\\'));
    if ends_with_separator {
        root.len()
    } else {
        root.len() + 1
    }
}

/// Derives the relative path of `absolute` under a root whose formatted
/// string has length `strip`.
pub(crate) fn relative_path(absolute: &str, strip: usize, normalize_separators: bool) -> String {
    let relative = absolute.get(strip..).unwrap_or_default();
    if normalize_separators {
        relative.replace('\\', "/")
    } else {
        relative.to_string()
    }
}

/// Resolves what kind of node a walk entry is, following symlinks.
///
/// Returns `None` for dangling links and unreadable targets.
fn classify(entry: &DirEntry) -> Option<(bool, bool)> {
    let file_type = entry.file_type();
    if !file_type.is_symlink() {
        return Some((file_type.is_dir(), file_type.is_file()));
    }
    match fs::metadata(entry.path()) {
        Ok(meta) => Some((meta.is_dir(), meta.is_file())),
        Err(e) => {
            log::debug!("skipping unresolvable link {}: {}", entry.path().display(), e);
            None
        }
    }
}

/// Walks `root` and returns a freshly built index for `role`.
///
/// If `root` is not an existing directory the returned index is empty; use
/// [`fsops::is_directory`] to tell that apart from an empty directory.
pub fn list(root: impl AsRef<Path>, role: Role, options: &ListOptions) -> RoleIndex {
    let root_path = preferred_root(root.as_ref());
    let root_str = path_string(&root_path);
    let mut index = RoleIndex::new(role, root_str.clone());

    if !fsops::is_directory(&root_path) {
        log::debug!("not a directory, nothing to list: {}", root_str);
        return index;
    }

    let strip = prefix_len(&root_str);
    let max_depth = if options.recursive { usize::MAX } else { 1 };
    let walker = WalkDir::new(&root_path)
        .min_depth(1)
        .max_depth(max_depth)
        .follow_links(false);

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("traversal error under {}: {}", root_str, e);
                index.skipped += 1;
                continue;
            }
        };

        let Some((is_dir, is_file)) = classify(&entry) else {
            index.skipped += 1;
            continue;
        };
        let wanted = match role {
            Role::Folders => is_dir,
            Role::Files => is_file,
        };
        if !wanted {
            continue;
        }

        let absolute = path_string(entry.path());
        let relative = relative_path(&absolute, strip, options.normalize_separators);
        let inserted = index.insert(PathEntry {
            absolute,
            relative,
            native: entry.path().to_path_buf(),
        });
        if !inserted {
            log::warn!(
                "path collides with an indexed one, skipping: {}",
                entry.path().display()
            );
            index.skipped += 1;
        }
    }

    index
}
