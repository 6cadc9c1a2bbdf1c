//! # dirzip
//!
//! Directory listings with dual path indexes, and streaming zip archive
//! extraction, insertion and deletion.
//!
//! The crate has two independent halves:
//!
//! - [`index`] walks a directory (one level or the whole subtree) and builds
//!   absolute/relative path maps in hashed and shallowest-first order. The
//!   [`retention`] sweeper uses it to delete files older than a number of days.
//! - [`read`] and [`edit`] work on zip archives without loading whole entries
//!   into memory.
//!
//! ## Quick Start
//!
//! ### Listing a Directory
//!
//! ```rust,no_run
//! use dirzip::{ListOptions, PathIndex, PathType};
//!
//! let mut index = PathIndex::new();
//! let listing = index.list_files(
//!     "/srv/data",
//!     &ListOptions::new().recursive(true).path_type(PathType::Relative),
//! );
//! print!("{}", listing);
//! println!("{} files", index.files_count());
//! ```
//!
//! ### Extracting an Archive
//!
//! ```rust,no_run
//! use dirzip::{Result, callbacks};
//!
//! fn main() -> Result<()> {
//!     let mut reporter = callbacks(
//!         |written, total| println!("{}/{} bytes", written, total),
//!         |message| eprintln!("{}", message),
//!     );
//!     let result = dirzip::extract_all("./output", "bundle.zip", &mut reporter)?;
//!     println!(
//!         "{} of {} entries extracted",
//!         result.entries_extracted, result.entries_total
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ### Modifying an Archive
//!
//! ```rust,no_run
//! use dirzip::{NoProgress, Result};
//!
//! fn main() -> Result<()> {
//!     dirzip::add_directory_entry("bundle.zip", "config")?;
//!     dirzip::add_file("app.toml", "bundle.zip", "config/app.toml", &mut NoProgress)?;
//!     let removed = dirzip::remove_entry("bundle.zip", "config/old.toml")?;
//!     println!("removed {} entries", removed);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Precondition violations (missing directory, missing archive, empty entry
//! name) are returned as [`Error`]. Failures of a single entry inside a
//! multi-entry operation are reported through
//! [`ProgressReporter::on_error`] and the operation continues; see
//! [`ExtractResult::is_complete`].
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `deflate` | Yes | Deflate compression for reading and writing |
//! | `bzip2` | No | BZip2 compression |
//! | `zstd` | No | Zstandard compression |
//! | `cli` | No | Command-line interface tool |
//!
//! ## Minimum Supported Rust Version (MSRV)
//!
//! This crate requires **Rust 1.85** or later.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod edit;
pub mod entry_name;
pub mod error;
pub mod fsops;
pub mod index;
pub mod progress;
pub mod read;
pub mod retention;

pub use entry_name::EntryName;
pub use error::{Error, Result};

// Re-export index API at crate root for convenience
pub use index::{ListOptions, PathEntry, PathIndex, PathType, Role, RoleIndex, SlashOrdered};

// Re-export reading API at crate root for convenience
pub use read::{
    Entry, EntryKind, ExtractOptions, ExtractResult, ZipReader, extract_all, extract_one,
    extract_text,
};

// Re-export edit API
pub use edit::{
    ArchiveEditor, Compression, EditResult, WriteOptions, add_directory_entry, add_file,
    remove_entry,
};

// Re-export progress API
pub use progress::{NoProgress, ProgressReporter, StatisticsProgress, callbacks, progress_fn};

// Re-export retention API
pub use retention::{RetentionSweeper, RetentionWindow, SweepResult, clean_up_files};
