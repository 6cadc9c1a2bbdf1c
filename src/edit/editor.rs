//! Archive editor for modifying zip archives in place.

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use zip::ZipWriter;

use super::WriteOptions;
use super::operation::Operation;
use crate::read::{DEFAULT_BUFFER_SIZE, Entry, ZipReader};
use crate::{EntryName, Error, Result, fsops};

/// Result of applying an edit.
#[must_use = "edit result should be checked to verify operation completed as expected"]
#[derive(Debug, Clone, Default)]
pub struct EditResult {
    /// Entries copied over unchanged (still compressed).
    pub entries_kept: usize,
    /// Entries removed by delete operations.
    pub entries_deleted: usize,
    /// Old entries dropped because an added entry has the same name.
    pub entries_replaced: usize,
    /// New entries written.
    pub entries_added: usize,
    /// Uncompressed bytes of the new entries.
    pub bytes_added: u64,
}

impl EditResult {
    /// Returns the number of entries in the resulting archive.
    pub fn total_entries(&self) -> usize {
        self.entries_kept + self.entries_added
    }
}

/// An editor for a zip archive on disk.
///
/// Operations are queued and only applied when [`apply`](Self::apply) is
/// called. Applying writes a new archive into a temporary file in the same
/// directory and then renames it over the original, so a failed edit leaves
/// the original untouched. Unchanged entries are copied without
/// recompression.
///
/// A zero-length file is accepted as an empty archive.
///
/// # Example
///
/// ```rust,no_run
/// use dirzip::edit::ArchiveEditor;
///
/// let mut editor = ArchiveEditor::open("bundle.zip")?;
/// editor.add_directory("logs")?;
/// editor.add_file("logs/today.log", "/var/log/app/today.log")?;
/// let removed = editor.delete("obsolete.txt")?;
/// let result = editor.apply()?;
/// println!("removed {}, added {}", removed, result.entries_added);
/// # Ok::<(), dirzip::Error>(())
/// ```
pub struct ArchiveEditor {
    path: PathBuf,
    source: Option<ZipReader<File>>,
    operations: Vec<Operation>,
    options: WriteOptions,
}

impl ArchiveEditor {
    /// Opens the archive at `path` for editing.
    ///
    /// # Errors
    ///
    /// [`Error::NotAFile`] if `path` is not a regular file, [`Error::Zip`] if
    /// it is neither empty nor a readable zip archive.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !fsops::is_file(path) {
            return Err(Error::NotAFile {
                path: path.to_path_buf(),
            });
        }
        let source = if fsops::file_size(path)? == 0 {
            log::debug!("{} is empty, starting a new archive", path.display());
            None
        } else {
            Some(ZipReader::open(path)?)
        };
        Ok(Self {
            path: path.to_path_buf(),
            source,
            operations: Vec::new(),
            options: WriteOptions::default(),
        })
    }

    /// Sets the options used for added entries.
    pub fn with_options(mut self, options: WriteOptions) -> Self {
        self.options = options;
        self
    }

    /// Returns the path of the archive being edited.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the entries of the archive as it was opened.
    pub fn entries(&self) -> &[Entry] {
        match &self.source {
            Some(reader) => reader.entries(),
            None => &[],
        }
    }

    /// Returns the queued operations.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Returns the number of pending operations.
    pub fn pending_operations(&self) -> usize {
        self.operations.len()
    }

    /// Returns whether there are any pending operations.
    pub fn has_pending_operations(&self) -> bool {
        !self.operations.is_empty()
    }

    /// Clears all pending operations.
    pub fn clear_operations(&mut self) {
        self.operations.clear();
    }

    /// Queues a directory marker. A trailing `/` is appended if missing.
    pub fn add_directory(&mut self, name: &str) -> Result<()> {
        let name = EntryName::new(name)?.into_directory();
        self.queue_addition(Operation::AddDirectory { name });
        Ok(())
    }

    /// Queues a file entry whose content is streamed from `source` when the
    /// edit is applied.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidEntryName`] for an invalid name, [`Error::NotAFile`]
    /// if `source` is not a regular file.
    pub fn add_file(&mut self, name: &str, source: impl AsRef<Path>) -> Result<()> {
        let name = EntryName::new(name)?;
        let source = source.as_ref();
        if !fsops::is_file(source) {
            return Err(Error::NotAFile {
                path: source.to_path_buf(),
            });
        }
        self.queue_addition(Operation::AddFile {
            name,
            source: source.to_path_buf(),
        });
        Ok(())
    }

    /// Queues a file entry with in-memory content.
    pub fn add_bytes(&mut self, name: &str, data: impl Into<Vec<u8>>) -> Result<()> {
        let name = EntryName::new(name)?;
        self.queue_addition(Operation::AddBytes {
            name,
            data: data.into(),
        });
        Ok(())
    }

    /// Queues deletion of every entry named `name`.
    ///
    /// If nothing has exactly this name and the name does not end with `/`,
    /// the directory-marker spelling `name/` is tried instead. Deleting a
    /// directory marker also deletes every entry stored below it. Pending
    /// additions the deletion covers are dropped.
    ///
    /// Returns the number of existing entries that will be removed; `0`
    /// queues no deletion.
    pub fn delete(&mut self, name: &str) -> Result<usize> {
        let mut target = EntryName::new(name)?;
        let mut count = self.count_deletable(&target);
        if count == 0 && !self.has_pending_addition(&target) {
            if let Some(directory) = target.directory_variant() {
                let directory_count = self.count_deletable(&directory);
                if directory_count > 0 || self.has_pending_addition(&directory) {
                    count = directory_count;
                    target = directory;
                }
            }
        }

        let pending = self.operations.len();
        self.operations
            .retain(|op| !(op.is_addition() && target.covers(op.name().as_str())));
        let cancelled = pending - self.operations.len();
        if cancelled > 0 {
            log::debug!("dropped {} pending additions under {}", cancelled, target);
        }

        if count > 0 {
            self.operations.push(Operation::Delete { name: target });
        }
        Ok(count)
    }

    /// Applies all pending operations and replaces the archive on disk.
    pub fn apply(self) -> Result<EditResult> {
        let ArchiveEditor {
            path,
            mut source,
            operations,
            options,
        } = self;
        let mut result = EditResult::default();

        let deletions: Vec<&EntryName> = operations
            .iter()
            .filter(|op| !op.is_addition())
            .map(Operation::name)
            .collect();
        let added: HashSet<&str> = operations
            .iter()
            .filter(|op| op.is_addition())
            .map(|op| op.name().as_str())
            .collect();

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let mut writer = ZipWriter::new(NamedTempFile::new_in(&dir)?);

        if let Some(reader) = source.as_mut() {
            let entries = reader.entries().to_vec();
            for entry in &entries {
                if deletions.iter().any(|d| d.covers(&entry.name)) {
                    result.entries_deleted += 1;
                    continue;
                }
                if added.contains(entry.name.as_str()) {
                    result.entries_replaced += 1;
                    continue;
                }
                reader.copy_raw(entry.index, &mut writer)?;
                result.entries_kept += 1;
            }
        }

        for op in &operations {
            match op {
                Operation::AddDirectory { name } => {
                    writer.add_directory(name.as_str(), options.directory_options())?;
                }
                Operation::AddFile { name, source } => {
                    let unreadable = |e: io::Error| Error::SourceRead {
                        path: source.clone(),
                        source: e,
                    };
                    let mut file = File::open(source).map_err(unreadable)?;
                    let size = file.metadata().map_err(unreadable)?.len();
                    writer.start_file(name.as_str(), options.file_options(size))?;
                    let mut buf = vec![
                        0u8;
                        usize::try_from(size)
                            .unwrap_or(DEFAULT_BUFFER_SIZE)
                            .clamp(1, DEFAULT_BUFFER_SIZE)
                    ];
                    result.bytes_added += copy_source(source, &mut file, &mut writer, &mut buf)?;
                }
                Operation::AddBytes { name, data } => {
                    writer.start_file(name.as_str(), options.file_options(data.len() as u64))?;
                    writer.write_all(data)?;
                    result.bytes_added += data.len() as u64;
                }
                Operation::Delete { .. } => continue,
            }
            result.entries_added += 1;
        }

        let temp = writer.finish()?;
        // The source handle must be closed before the rename on some platforms
        drop(source);

        let permissions = fs::metadata(&path)?.permissions();
        fs::set_permissions(temp.path(), permissions)?;
        temp.persist(&path).map_err(|e| Error::Io(e.error))?;

        log::debug!(
            "rewrote {}: kept {}, deleted {}, replaced {}, added {}",
            path.display(),
            result.entries_kept,
            result.entries_deleted,
            result.entries_replaced,
            result.entries_added
        );
        Ok(result)
    }

    /// Queues an addition, dropping an earlier pending addition of the same name.
    fn queue_addition(&mut self, op: Operation) {
        let name = op.name().as_str().to_string();
        self.operations
            .retain(|existing| !(existing.is_addition() && existing.name().as_str() == name));
        self.operations.push(op);
    }

    /// Returns `true` if a pending addition is covered by `name`.
    fn has_pending_addition(&self, name: &EntryName) -> bool {
        self.operations
            .iter()
            .any(|op| op.is_addition() && name.covers(op.name().as_str()))
    }

    /// Counts existing entries covered by `name` and not by a deletion
    /// queued earlier.
    fn count_deletable(&self, name: &EntryName) -> usize {
        let queued: Vec<&EntryName> = self
            .operations
            .iter()
            .filter(|op| !op.is_addition())
            .map(Operation::name)
            .collect();
        self.entries()
            .iter()
            .filter(|e| name.covers(&e.name) && !queued.iter().any(|q| q.covers(&e.name)))
            .count()
    }
}

/// Streams `file` into the entry being written.
///
/// Read failures become [`Error::SourceRead`]; failures to write the new
/// archive stay [`Error::Io`].
fn copy_source<W: Write>(
    path: &Path,
    file: &mut File,
    writer: &mut W,
    buf: &mut [u8],
) -> Result<u64> {
    let mut total = 0u64;
    loop {
        let n = match file.read(buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                return Err(Error::SourceRead {
                    path: path.to_path_buf(),
                    source: e,
                });
            }
        };
        writer.write_all(&buf[..n])?;
        total += n as u64;
    }
    Ok(total)
}
