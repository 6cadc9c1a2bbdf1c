//! Archive reading API for zip archives.
//!
//! This module lists the entries of a zip archive and streams their content
//! to disk without holding a whole entry in memory.
//!
//! # Example
//!
//! ```rust,no_run
//! use dirzip::NoProgress;
//! use dirzip::read::{ExtractOptions, ZipReader};
//!
//! let mut reader = ZipReader::open("bundle.zip")?;
//! for entry in reader.entries() {
//!     println!("{}: {} bytes", entry.name, entry.size);
//! }
//!
//! let result = reader.extract_all("./output", &ExtractOptions::default(), &mut NoProgress)?;
//! assert!(result.is_complete());
//! # Ok::<(), dirzip::Error>(())
//! ```

mod entry;
mod extraction;
mod info;
mod options;

pub use entry::{Entry, EntryKind};
pub use extraction::{extract_all, extract_all_with, extract_one, extract_one_with, extract_text};
pub use info::ExtractResult;
pub use options::{DEFAULT_BUFFER_SIZE, ExtractOptions};

use std::fs::File;
use std::io::{Read, Seek, Write};
use std::path::Path;

use zip::{ZipArchive, ZipWriter};

use crate::{Error, Result, fsops};

/// A read-only zip archive with its entry table scanned up front.
pub struct ZipReader<R = File> {
    archive: ZipArchive<R>,
    entries: Vec<Entry>,
}

impl ZipReader<File> {
    /// Opens the archive at `path`.
    ///
    /// # Errors
    ///
    /// [`Error::NotAFile`] if `path` is not a regular file, [`Error::Zip`] if
    /// it is not a readable zip archive.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !fsops::is_file(path) {
            return Err(Error::NotAFile {
                path: path.to_path_buf(),
            });
        }
        let file = File::open(path)?;
        Self::new(file)
    }
}

impl<R: Read + Seek> ZipReader<R> {
    /// Reads the central directory from `reader`.
    pub fn new(reader: R) -> Result<Self> {
        let mut archive = ZipArchive::new(reader)?;
        let mut entries = Vec::with_capacity(archive.len());
        for index in 0..archive.len() {
            let file = archive.by_index_raw(index)?;
            let name = file.name().to_string();
            let size = file.size();
            let crc32 = file.crc32();
            entries.push(Entry {
                index,
                kind: EntryKind::classify(&name, size, crc32),
                compressed_size: file.compressed_size(),
                name,
                size,
                crc32,
            });
        }
        Ok(Self { archive, entries })
    }

    /// Returns the entries in central-directory order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Returns the number of entries, directories included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the archive has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the uncompressed size of all file entries.
    pub fn total_file_size(&self) -> u64 {
        self.entries
            .iter()
            .filter(|e| e.is_file())
            .map(|e| e.size)
            .sum()
    }

    /// Returns `true` if an entry with exactly this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.entry(name).is_some()
    }

    /// Looks up an entry by its exact stored name.
    pub fn entry(&self, name: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Reads an entry fully and decodes it as UTF-8 text.
    ///
    /// Invalid sequences are replaced with `U+FFFD`. Returns `Ok(None)` if the
    /// archive has no entry with this name.
    pub fn read_text(&mut self, name: &str) -> Result<Option<String>> {
        let Some(entry) = self.entry(name) else {
            return Ok(None);
        };
        let (index, size) = (entry.index, entry.size);
        let mut file = self.archive.by_index(index)?;
        let mut data = Vec::with_capacity(usize::try_from(size).unwrap_or(0).min(1 << 20));
        file.read_to_end(&mut data)?;
        Ok(Some(String::from_utf8_lossy(&data).into_owned()))
    }

    /// Copies the entry at `index` into `writer` without recompressing it.
    pub(crate) fn copy_raw<W: Write + Seek>(
        &mut self,
        index: usize,
        writer: &mut ZipWriter<W>,
    ) -> Result<()> {
        let file = self.archive.by_index_raw(index)?;
        writer.raw_copy_file(file)?;
        Ok(())
    }
}
