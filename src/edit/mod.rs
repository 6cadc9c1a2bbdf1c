//! Archive editing and modification.
//!
//! This module modifies existing zip archives by:
//! - Adding directory markers
//! - Adding file entries (streamed from disk or from memory)
//! - Deleting entries
//!
//! # Example
//!
//! ```rust,no_run
//! use dirzip::NoProgress;
//!
//! dirzip::add_directory_entry("bundle.zip", "reports")?;
//! let added = dirzip::add_file("q3.csv", "bundle.zip", "reports/q3.csv", &mut NoProgress)?;
//! assert!(added);
//!
//! // "reports" is retried as "reports/" when no entry has the bare name,
//! // and the marker goes together with everything below it
//! let removed = dirzip::remove_entry("bundle.zip", "reports")?;
//! assert_eq!(removed, 2);
//! # Ok::<(), dirzip::Error>(())
//! ```
//!
//! # Implementation Notes
//!
//! [`ArchiveEditor::apply`] works by:
//! 1. Creating a temporary file next to the archive
//! 2. Copying every kept entry raw, without recompression
//! 3. Skipping deleted entries (a deleted directory marker takes everything
//!    below it) and entries replaced by an addition
//! 4. Writing the added entries
//! 5. Renaming the temporary file over the archive

mod editor;
mod operation;
mod options;

pub use editor::{ArchiveEditor, EditResult};
pub use operation::Operation;
pub use options::{Compression, WriteOptions};

use std::fs::File;
use std::path::Path;

use crate::progress::ProgressReporter;
use crate::{EntryName, Error, Result, fsops};

/// Adds a directory marker to the archive at `archive`.
///
/// A trailing `/` is appended to `entry_name` if missing.
///
/// # Errors
///
/// [`Error::InvalidEntryName`] for an empty name, [`Error::NotAFile`] if the
/// archive does not exist.
pub fn add_directory_entry(archive: impl AsRef<Path>, entry_name: &str) -> Result<()> {
    EntryName::new(entry_name)?;
    let mut editor = ArchiveEditor::open(archive)?;
    editor.add_directory(entry_name)?;
    let _ = editor.apply()?;
    Ok(())
}

/// Adds the file at `file` to the archive at `archive` as `entry_name`.
///
/// Returns `Ok(false)` when the source exists but cannot be read, or when the
/// rewritten archive cannot be stored; the failure is reported through
/// [`ProgressReporter::on_error`] and the archive is left untouched.
///
/// # Errors
///
/// [`Error::InvalidEntryName`] for an empty name, [`Error::NotAFile`] if
/// either the source or the archive is not a regular file.
pub fn add_file(
    file: impl AsRef<Path>,
    archive: impl AsRef<Path>,
    entry_name: &str,
    reporter: &mut dyn ProgressReporter,
) -> Result<bool> {
    let file = file.as_ref();
    let archive = archive.as_ref();
    EntryName::new(entry_name)?;
    if !fsops::is_file(file) {
        return Err(Error::NotAFile {
            path: file.to_path_buf(),
        });
    }
    let mut editor = ArchiveEditor::open(archive)?;

    let size = match File::open(file).and_then(|f| f.metadata()) {
        Ok(meta) => meta.len(),
        Err(e) => {
            let error = Error::SourceRead {
                path: file.to_path_buf(),
                source: e,
            };
            report_failure(reporter, &failure_message(&error, archive));
            return Ok(false);
        }
    };
    reporter.on_total(size);
    editor.add_file(entry_name, file)?;

    match editor.apply() {
        Ok(result) => {
            reporter.on_progress(result.bytes_added, size);
            Ok(true)
        }
        Err(e @ (Error::SourceRead { .. } | Error::Io(_))) => {
            report_failure(reporter, &failure_message(&e, archive));
            Ok(false)
        }
        Err(e) => Err(e),
    }
}

/// Describes a failed addition: unreadable sources name the source file,
/// everything else names the archive being rewritten.
fn failure_message(error: &Error, archive: &Path) -> String {
    match error {
        Error::SourceRead { .. } => error.to_string(),
        Error::Io(e) => format!("Unable to rewrite archive {}: {}", archive.display(), e),
        other => format!("Unable to update archive {}: {}", archive.display(), other),
    }
}

fn report_failure(reporter: &mut dyn ProgressReporter, message: &str) {
    log::warn!("{}", message);
    reporter.on_error(message);
}

/// Removes every entry named `entry_name` from the archive at `archive`.
///
/// When nothing matches and the name does not end with `/`, the name is
/// retried with a trailing `/`. A directory marker is removed together with
/// every entry stored below it. Returns the number of removed entries; `0`
/// means nothing matched and the archive was not rewritten.
///
/// # Errors
///
/// [`Error::InvalidEntryName`] for an empty name, [`Error::NotAFile`] if the
/// archive does not exist, [`Error::Io`] / [`Error::Zip`] if the archive
/// could not be rewritten.
pub fn remove_entry(archive: impl AsRef<Path>, entry_name: &str) -> Result<usize> {
    let archive = archive.as_ref();
    let mut editor = ArchiveEditor::open(archive)?;
    let count = editor.delete(entry_name)?;
    if count == 0 {
        log::debug!("no entry {} in {}", entry_name, archive.display());
        return Ok(0);
    }
    let _ = editor.apply()?;
    Ok(count)
}
