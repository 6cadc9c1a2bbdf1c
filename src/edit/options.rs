//! Options for entries written into an archive.

use zip::CompressionMethod;
use zip::write::SimpleFileOptions;

/// Compression applied to new file entries.
///
/// Which methods are available depends on the enabled cargo features.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    /// No compression.
    Stored,
    /// Deflate (feature `deflate`, enabled by default).
    #[cfg(feature = "deflate")]
    Deflated,
    /// Bzip2 (feature `bzip2`).
    #[cfg(feature = "bzip2")]
    Bzip2,
    /// Zstandard (feature `zstd`).
    #[cfg(feature = "zstd")]
    Zstd,
}

impl Default for Compression {
    fn default() -> Self {
        #[cfg(feature = "deflate")]
        {
            Compression::Deflated
        }
        #[cfg(not(feature = "deflate"))]
        {
            Compression::Stored
        }
    }
}

impl Compression {
    /// Parses a method name as used on the command line.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "stored" | "store" | "none" => Some(Compression::Stored),
            #[cfg(feature = "deflate")]
            "deflate" | "deflated" => Some(Compression::Deflated),
            #[cfg(feature = "bzip2")]
            "bzip2" => Some(Compression::Bzip2),
            #[cfg(feature = "zstd")]
            "zstd" => Some(Compression::Zstd),
            _ => None,
        }
    }

    fn method(self) -> CompressionMethod {
        match self {
            Compression::Stored => CompressionMethod::Stored,
            #[cfg(feature = "deflate")]
            Compression::Deflated => CompressionMethod::Deflated,
            #[cfg(feature = "bzip2")]
            Compression::Bzip2 => CompressionMethod::Bzip2,
            #[cfg(feature = "zstd")]
            Compression::Zstd => CompressionMethod::Zstd,
        }
    }
}

/// Options for entries added by an [`ArchiveEditor`](super::ArchiveEditor).
#[derive(Debug, Clone, Default)]
pub struct WriteOptions {
    /// Compression for file entries. Directory markers are always stored.
    pub compression: Compression,
    /// Unix permission bits recorded for new entries.
    pub unix_permissions: Option<u32>,
}

impl WriteOptions {
    /// Creates options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the compression method.
    pub fn compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Sets the Unix permission bits.
    pub fn unix_permissions(mut self, mode: u32) -> Self {
        self.unix_permissions = Some(mode);
        self
    }

    /// Builds the zip options for a file entry of `size` bytes.
    pub(crate) fn file_options(&self, size: u64) -> SimpleFileOptions {
        let mut options = SimpleFileOptions::default()
            .compression_method(self.compression.method())
            .large_file(size >= u64::from(u32::MAX));
        if let Some(mode) = self.unix_permissions {
            options = options.unix_permissions(mode);
        }
        options
    }

    /// Builds the zip options for a directory marker.
    pub(crate) fn directory_options(&self) -> SimpleFileOptions {
        let mut options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
        if let Some(mode) = self.unix_permissions {
            options = options.unix_permissions(mode);
        }
        options
    }
}
