//! Error types for directory indexing and zip archive operations.
//!
//! This module provides the [`Error`] enum which represents the failure modes
//! of the crate, along with a convenient [`Result<T>`] type alias.
//!
//! # Error Handling
//!
//! Precondition violations (a missing destination directory, an archive path
//! that is not a regular file, an empty entry name) are returned as `Err`
//! before anything touches the disk. Failures that affect a single entry of a
//! multi-entry operation are *not* errors: they are reported through
//! [`ProgressReporter::on_error`] and recorded in the operation result, and
//! the operation keeps going.
//!
//! ```rust,no_run
//! use dirzip::{Error, NoProgress, extract_all};
//!
//! fn unpack(dest: &str, archive: &str) -> dirzip::Result<bool> {
//!     match extract_all(dest, archive, &mut NoProgress) {
//!         Ok(result) => Ok(result.is_complete()),
//!         Err(Error::NotAFile { path }) => {
//!             eprintln!("No archive at {}", path.display());
//!             Ok(false)
//!         }
//!         Err(e) => Err(e),
//!     }
//! }
//! ```
//!
//! [`ProgressReporter::on_error`]: crate::progress::ProgressReporter::on_error

use std::io;
use std::path::PathBuf;

/// The main error type for this crate.
///
/// # Error Categories
///
/// | Category | Variants | Typical Cause |
/// |----------|----------|---------------|
/// | I/O | [`Io`][Self::Io] | File system operations |
/// | Container | [`Zip`][Self::Zip] | Corrupt or unsupported zip data |
/// | Preconditions | [`NotADirectory`][Self::NotADirectory], [`NotAFile`][Self::NotAFile], [`InvalidEntryName`][Self::InvalidEntryName] | Bad arguments |
/// | Lookup | [`EntryNotFound`][Self::EntryNotFound], [`NotAFileEntry`][Self::NotAFileEntry] | Entry missing or of the wrong kind |
/// | Editing | [`SourceRead`][Self::SourceRead] | A file to add became unreadable |
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// An I/O error occurred during file operations.
    ///
    /// Check the underlying [`std::io::ErrorKind`] for specific handling:
    ///
    /// ```rust
    /// use dirzip::Error;
    /// use std::io::ErrorKind;
    ///
    /// fn handle_io_error(error: &Error) {
    ///     if let Error::Io(e) = error {
    ///         match e.kind() {
    ///             ErrorKind::NotFound => println!("File not found"),
    ///             ErrorKind::PermissionDenied => println!("Access denied"),
    ///             _ => println!("I/O error: {}", e),
    ///         }
    ///     }
    /// }
    /// ```
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The zip container could not be parsed or written.
    ///
    /// Raised when the central directory is corrupt, the file is not a zip
    /// archive at all, or an entry uses a compression method that is not
    /// enabled through a cargo feature.
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// A path that must be an existing directory is missing or is not a directory.
    #[error("Not a directory: {}", path.display())]
    NotADirectory {
        /// The offending path.
        path: PathBuf,
    },

    /// A path that must be an existing regular file is missing or is not a file.
    #[error("Not a regular file: {}", path.display())]
    NotAFile {
        /// The offending path.
        path: PathBuf,
    },

    /// An entry name was rejected.
    ///
    /// Entry names must be non-empty and must not contain NUL bytes.
    #[error("Invalid entry name: {0}")]
    InvalidEntryName(String),

    /// The requested entry does not exist in the archive.
    ///
    /// ```rust,no_run
    /// use dirzip::{Error, NoProgress, extract_one};
    ///
    /// match extract_one("out", "bundle.zip", "docs/readme.txt", &mut NoProgress) {
    ///     Err(Error::EntryNotFound { name }) => eprintln!("no entry {}", name),
    ///     other => println!("{:?}", other.map(|written| written)),
    /// }
    /// ```
    #[error("Entry not found: {name}")]
    EntryNotFound {
        /// The entry name that was looked up.
        name: String,
    },

    /// A file being added to an archive could not be opened or read.
    ///
    /// Failures to write the rewritten archive itself are reported as
    /// [`Io`][Self::Io] instead.
    #[error("Unable to read file {}: {source}", path.display())]
    SourceRead {
        /// The file that was being added.
        path: PathBuf,
        /// The underlying read error.
        source: io::Error,
    },

    /// The entry exists but is a directory marker where a file was required.
    #[error("Entry is a directory: {name}")]
    NotAFileEntry {
        /// The entry name.
        name: String,
    },
}

impl Error {
    /// Returns `true` if the error was raised by a precondition check,
    /// before any filesystem or archive state was modified.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Error::NotADirectory { .. } | Error::NotAFile { .. } | Error::InvalidEntryName(_)
        )
    }

    /// Returns `true` if the error means "the thing asked for is not there".
    ///
    /// This covers both missing entries and I/O errors of kind
    /// [`NotFound`](io::ErrorKind::NotFound).
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::EntryNotFound { .. } => true,
            Error::Io(e) | Error::SourceRead { source: e, .. } => {
                e.kind() == io::ErrorKind::NotFound
            }
            Error::Zip(zip::result::ZipError::FileNotFound) => true,
            _ => false,
        }
    }
}

/// A specialized Result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
