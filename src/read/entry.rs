//! Archive entry types.

/// How an entry was classified when the archive was scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// A regular file entry.
    File,
    /// A directory marker: the name ends with `/`.
    Directory,
    /// An entry without a trailing `/` whose size and CRC-32 are both zero.
    ///
    /// Some archivers store directories this way. An empty file is
    /// indistinguishable from such a marker, so it is classified here too.
    InferredDirectory,
}

impl EntryKind {
    /// Classifies an entry from its stored name, size and checksum.
    ///
    /// ```rust
    /// use dirzip::read::EntryKind;
    ///
    /// assert_eq!(EntryKind::classify("docs/", 0, 0), EntryKind::Directory);
    /// assert_eq!(EntryKind::classify("docs", 0, 0), EntryKind::InferredDirectory);
    /// assert_eq!(EntryKind::classify("a.txt", 5, 0x3610a686), EntryKind::File);
    /// ```
    pub fn classify(name: &str, size: u64, crc32: u32) -> Self {
        if name.ends_with('/') || name.ends_with('\\') {
            EntryKind::Directory
        } else if size == 0 && crc32 == 0 {
            EntryKind::InferredDirectory
        } else {
            EntryKind::File
        }
    }

    /// Returns `true` for both explicit and inferred directories.
    pub fn is_directory(self) -> bool {
        !matches!(self, EntryKind::File)
    }
}

/// An entry of a zip archive, as recorded in its central directory.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct Entry {
    /// Position in the central directory.
    pub index: usize,
    /// The stored name, `/`-delimited.
    pub name: String,
    /// Uncompressed size in bytes.
    pub size: u64,
    /// Compressed size in bytes.
    pub compressed_size: u64,
    /// CRC-32 of the uncompressed data.
    pub crc32: u32,
    /// Classification made at scan time.
    pub kind: EntryKind,
}

impl Entry {
    /// Returns `true` if the entry is treated as a directory during extraction.
    pub fn is_directory(&self) -> bool {
        self.kind.is_directory()
    }

    /// Returns `true` if the entry is treated as a file during extraction.
    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    /// Returns `true` if the name carries a trailing separator.
    pub fn has_directory_marker(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_explicit_directory() {
        assert_eq!(EntryKind::classify("a/b/", 0, 0), EntryKind::Directory);
        assert_eq!(EntryKind::classify("a/b/", 10, 1), EntryKind::Directory);
        assert_eq!(EntryKind::classify(r"win\dir\", 0, 0), EntryKind::Directory);
    }

    #[test]
    fn test_classify_inferred_directory() {
        let kind = EntryKind::classify("legacy_dir", 0, 0);
        assert_eq!(kind, EntryKind::InferredDirectory);
        assert!(kind.is_directory());
    }

    #[test]
    fn test_classify_file() {
        assert_eq!(EntryKind::classify("a.txt", 1, 0), EntryKind::File);
        assert_eq!(EntryKind::classify("a.txt", 0, 7), EntryKind::File);
        assert!(!EntryKind::File.is_directory());
    }
}
