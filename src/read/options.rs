//! Extraction options.

use crate::progress::BYTES_MIB;

/// Default size of the buffer entry content is streamed through.
pub const DEFAULT_BUFFER_SIZE: usize = 16 * BYTES_MIB as usize;

/// Options for extracting entries to disk.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Upper bound for the streaming buffer, in bytes.
    pub buffer_size: usize,
    /// Delete a file whose content could not be written completely.
    ///
    /// Off by default: a failed entry may leave a truncated file behind.
    pub remove_partial_files: bool,
    /// Create missing parent directories of file entries.
    pub create_parent_dirs: bool,
    /// Treat entries with zero size and zero CRC-32 as directories.
    pub infer_directories: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
            remove_partial_files: false,
            create_parent_dirs: true,
            infer_directories: true,
        }
    }
}

impl ExtractOptions {
    /// Creates options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the streaming buffer size.
    pub fn buffer_size(mut self, bytes: usize) -> Self {
        self.buffer_size = bytes;
        self
    }

    /// Sets whether partially written files are deleted.
    pub fn remove_partial_files(mut self, remove: bool) -> Self {
        self.remove_partial_files = remove;
        self
    }

    /// Sets whether parent directories of file entries are created.
    pub fn create_parent_dirs(mut self, create: bool) -> Self {
        self.create_parent_dirs = create;
        self
    }

    /// Sets whether zero-size, zero-checksum entries count as directories.
    pub fn infer_directories(mut self, infer: bool) -> Self {
        self.infer_directories = infer;
        self
    }

    /// Returns the buffer length to use for an entry of `entry_size` bytes.
    ///
    /// Never larger than the configured size or the entry, never zero.
    pub(crate) fn chunk_len(&self, entry_size: u64) -> usize {
        let cap = self.buffer_size.max(1);
        usize::try_from(entry_size)
            .map(|size| size.clamp(1, cap))
            .unwrap_or(cap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = ExtractOptions::default();
        assert_eq!(opts.buffer_size, 16 * 1024 * 1024);
        assert!(!opts.remove_partial_files);
        assert!(opts.create_parent_dirs);
        assert!(opts.infer_directories);
    }

    #[test]
    fn test_builder() {
        let opts = ExtractOptions::new()
            .buffer_size(4096)
            .remove_partial_files(true)
            .create_parent_dirs(false)
            .infer_directories(false);
        assert_eq!(opts.buffer_size, 4096);
        assert!(opts.remove_partial_files);
        assert!(!opts.create_parent_dirs);
        assert!(!opts.infer_directories);
    }

    #[test]
    fn test_chunk_len() {
        let opts = ExtractOptions::new().buffer_size(1024);
        assert_eq!(opts.chunk_len(10), 10);
        assert_eq!(opts.chunk_len(0), 1);
        assert_eq!(opts.chunk_len(1 << 40), 1024);

        let zero = ExtractOptions::new().buffer_size(0);
        assert_eq!(zero.chunk_len(100), 1);
    }
}
