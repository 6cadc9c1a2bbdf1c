//! Streaming extraction of entries to disk.

use std::fs::File;
use std::io::{self, Read, Seek, Write};
use std::path::{Path, PathBuf};

use super::{Entry, EntryKind, ExtractOptions, ExtractResult, ZipReader};
use crate::progress::ProgressReporter;
use crate::{EntryName, Error, Result, fsops};

/// Copies `reader` to `writer` through `buf`, returning the bytes copied.
fn stream_entry<R, W>(reader: &mut R, writer: &mut W, buf: &mut [u8]) -> io::Result<u64>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let mut total = 0u64;
    loop {
        let n = match reader.read(buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        writer.write_all(&buf[..n])?;
        total += n as u64;
    }
    Ok(total)
}

/// What one entry turned into on disk.
enum Materialized {
    Directory,
    File(u64),
}

fn check_destination(dest: &Path) -> Result<()> {
    if fsops::is_directory(dest) {
        Ok(())
    } else {
        Err(Error::NotADirectory {
            path: dest.to_path_buf(),
        })
    }
}

/// Joins an entry name onto `dest`, refusing names that leave it.
fn enclosed_path(dest: &Path, name: &str) -> Result<PathBuf> {
    let checked = EntryName::new(name)?;
    if !checked.is_enclosed() {
        return Err(Error::InvalidEntryName(format!(
            "{} escapes the destination directory",
            name
        )));
    }
    let relative = name.trim_end_matches(['/', '\\']);
    Ok(dest.join(relative))
}

impl<R: Read + Seek> ZipReader<R> {
    /// Extracts every entry below `dest`.
    ///
    /// Directory entries (and, with
    /// [`infer_directories`](ExtractOptions::infer_directories), entries with
    /// zero size and zero checksum) become directories; all other entries are
    /// streamed to files. A failure on one entry is reported through
    /// [`ProgressReporter::on_error`], recorded in
    /// [`ExtractResult::failures`] and does not stop the remaining entries.
    ///
    /// # Errors
    ///
    /// [`Error::NotADirectory`] if `dest` is not an existing directory.
    pub fn extract_all(
        &mut self,
        dest: impl AsRef<Path>,
        options: &ExtractOptions,
        reporter: &mut dyn ProgressReporter,
    ) -> Result<ExtractResult> {
        let dest = dest.as_ref();
        check_destination(dest)?;

        let mut result = ExtractResult {
            entries_total: self.entries.len(),
            bytes_total: self.total_file_size(),
            ..Default::default()
        };
        reporter.on_total(result.bytes_total);

        // Clone entries to avoid borrow conflict with the archive
        let entries = self.entries.clone();
        for entry in &entries {
            reporter.on_entry_start(&entry.name, entry.size);
            match self.materialize(entry, dest, options) {
                Ok(Materialized::Directory) => {
                    result.entries_extracted += 1;
                    result.directories_created += 1;
                    reporter.on_entry_complete(&entry.name, true);
                }
                Ok(Materialized::File(bytes)) => {
                    result.entries_extracted += 1;
                    result.files_written += 1;
                    result.bytes_written += bytes;
                    reporter.on_progress(result.bytes_written, result.bytes_total);
                    reporter.on_entry_complete(&entry.name, true);
                }
                Err(e) => {
                    let message = format!(
                        "Encountered an error while writing {}: {}",
                        dest.join(&entry.name).display(),
                        e
                    );
                    log::warn!("{}", message);
                    reporter.on_error(&message);
                    result.failures.push((entry.name.clone(), e.to_string()));
                    reporter.on_entry_complete(&entry.name, false);
                }
            }
        }

        log::debug!(
            "extracted {}/{} entries ({} bytes) to {}",
            result.entries_extracted,
            result.entries_total,
            result.bytes_written,
            dest.display()
        );
        Ok(result)
    }

    fn materialize(
        &mut self,
        entry: &Entry,
        dest: &Path,
        options: &ExtractOptions,
    ) -> Result<Materialized> {
        let path = enclosed_path(dest, &entry.name)?;
        let is_directory = match entry.kind {
            EntryKind::Directory => true,
            EntryKind::InferredDirectory => options.infer_directories,
            EntryKind::File => false,
        };

        if is_directory {
            fsops::create_directories(&path)?;
            return Ok(Materialized::Directory);
        }

        if options.create_parent_dirs {
            if let Some(parent) = path.parent() {
                fsops::create_directories(parent)?;
            }
        }
        let bytes = self.write_entry(entry, &path, options)?;
        Ok(Materialized::File(bytes))
    }

    /// Streams one entry's content into a new file at `path`.
    fn write_entry(&mut self, entry: &Entry, path: &Path, options: &ExtractOptions) -> Result<u64> {
        let mut source = self.archive.by_index(entry.index)?;
        let mut out = File::create(path)?;
        let mut buf = vec![0u8; options.chunk_len(entry.size)];

        let written = stream_entry(&mut source, &mut out, &mut buf).and_then(|n| {
            out.flush()?;
            Ok(n)
        });
        match written {
            Ok(n) => Ok(n),
            Err(e) => {
                drop(out);
                if options.remove_partial_files {
                    match fsops::erase_file(path) {
                        Ok(_) => log::debug!("removed partial file {}", path.display()),
                        Err(cleanup) => log::warn!(
                            "failed to remove partial file {}: {}",
                            path.display(),
                            cleanup
                        ),
                    }
                }
                Err(Error::Io(e))
            }
        }
    }

    /// Extracts a single file entry into `out_dir`, flattened to its base name.
    ///
    /// The entry is looked up by its full stored name; the output file is
    /// named after the part following the last `/`. Returns the number of
    /// bytes written.
    ///
    /// # Errors
    ///
    /// - [`Error::NotADirectory`] if `out_dir` is not an existing directory
    /// - [`Error::EntryNotFound`] if no entry has this name
    /// - [`Error::NotAFileEntry`] if the name marks a directory
    /// - [`Error::Io`] / [`Error::Zip`] if writing the content fails
    pub fn extract_entry_to_dir(
        &mut self,
        out_dir: impl AsRef<Path>,
        entry_name: &str,
        options: &ExtractOptions,
    ) -> Result<u64> {
        let out_dir = out_dir.as_ref();
        check_destination(out_dir)?;
        let name = EntryName::new(entry_name)?;

        let entry = self
            .entry(name.as_str())
            .cloned()
            .ok_or_else(|| Error::EntryNotFound {
                name: name.to_string(),
            })?;
        if entry.has_directory_marker() {
            return Err(Error::NotAFileEntry { name: entry.name });
        }

        let file_name = name.file_name();
        if file_name.is_empty() || file_name == "." || file_name == ".." || file_name.contains('\\')
        {
            return Err(Error::InvalidEntryName(format!(
                "{} has no usable file name",
                entry_name
            )));
        }

        let path = out_dir.join(file_name);
        self.write_entry(&entry, &path, options)
    }
}

/// Extracts every entry of the archive at `archive` below `dest` with default
/// options.
///
/// See [`extract_all_with`].
///
/// # Example
///
/// ```rust,no_run
/// use dirzip::StatisticsProgress;
///
/// let mut stats = StatisticsProgress::new();
/// let result = dirzip::extract_all("./unpacked", "bundle.zip", &mut stats)?;
/// if !result.is_complete() {
///     for message in &stats.errors {
///         eprintln!("{}", message);
///     }
/// }
/// # Ok::<(), dirzip::Error>(())
/// ```
pub fn extract_all(
    dest: impl AsRef<Path>,
    archive: impl AsRef<Path>,
    reporter: &mut dyn ProgressReporter,
) -> Result<ExtractResult> {
    extract_all_with(dest, archive, &ExtractOptions::default(), reporter)
}

/// Extracts every entry of the archive at `archive` below `dest`.
///
/// # Errors
///
/// Precondition failures are checked before the archive is read:
/// [`Error::NotADirectory`] for `dest`, [`Error::NotAFile`] for `archive`.
/// An archive that cannot be parsed gives [`Error::Zip`]. Per-entry failures
/// are not errors; check [`ExtractResult::is_complete`].
pub fn extract_all_with(
    dest: impl AsRef<Path>,
    archive: impl AsRef<Path>,
    options: &ExtractOptions,
    reporter: &mut dyn ProgressReporter,
) -> Result<ExtractResult> {
    let dest = dest.as_ref();
    check_destination(dest)?;
    let mut reader = ZipReader::open(archive)?;
    reader.extract_all(dest, options, reporter)
}

/// Extracts one file entry into `out_dir` with default options.
///
/// Returns `Ok(true)` when the file was written. A write failure is reported
/// through [`ProgressReporter::on_error`] and returns `Ok(false)`.
///
/// # Errors
///
/// See [`ZipReader::extract_entry_to_dir`]; [`Error::NotAFile`] if `archive`
/// is not a regular file.
pub fn extract_one(
    out_dir: impl AsRef<Path>,
    archive: impl AsRef<Path>,
    entry_name: &str,
    reporter: &mut dyn ProgressReporter,
) -> Result<bool> {
    extract_one_with(out_dir, archive, entry_name, &ExtractOptions::default(), reporter)
}

/// Extracts one file entry into `out_dir`.
///
/// See [`extract_one`].
pub fn extract_one_with(
    out_dir: impl AsRef<Path>,
    archive: impl AsRef<Path>,
    entry_name: &str,
    options: &ExtractOptions,
    reporter: &mut dyn ProgressReporter,
) -> Result<bool> {
    let out_dir = out_dir.as_ref();
    check_destination(out_dir)?;
    let mut reader = ZipReader::open(archive)?;
    let total = reader.entry(entry_name).map_or(0, |e| e.size);
    reporter.on_total(total);

    match reader.extract_entry_to_dir(out_dir, entry_name, options) {
        Ok(bytes) => {
            reporter.on_progress(bytes, total);
            Ok(true)
        }
        Err(e @ (Error::Io(_) | Error::Zip(_))) => {
            let message = format!(
                "Encountered an error while writing {}: {}",
                out_dir.join(entry_name).display(),
                e
            );
            log::warn!("{}", message);
            reporter.on_error(&message);
            Ok(false)
        }
        Err(e) => Err(e),
    }
}

/// Reads an entry of the archive at `archive` as text.
///
/// Returns `Ok(None)` when the archive has no such entry.
///
/// ```rust,no_run
/// match dirzip::extract_text("bundle.zip", "manifest.txt")? {
///     Some(text) => print!("{}", text),
///     None => eprintln!("no manifest"),
/// }
/// # Ok::<(), dirzip::Error>(())
/// ```
pub fn extract_text(archive: impl AsRef<Path>, entry_name: &str) -> Result<Option<String>> {
    let mut reader = ZipReader::open(archive)?;
    reader.read_text(entry_name)
}
