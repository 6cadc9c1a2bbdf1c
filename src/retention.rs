//! Deletion of files older than a retention window.
//!
//! # Example
//!
//! ```rust,no_run
//! use dirzip::retention::{RetentionSweeper, RetentionWindow};
//!
//! let result = RetentionSweeper::new(RetentionWindow::days(7))
//!     .recursive(true)
//!     .sweep("/var/log/app");
//! println!("deleted {} of {} files", result.deleted, result.examined);
//! ```

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::fsops;
use crate::index::{ListOptions, Role, list};

/// Seconds in one retention day.
pub const SECONDS_PER_DAY: i64 = 86_400;

/// An age threshold in whole days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RetentionWindow {
    days: u64,
}

impl RetentionWindow {
    /// Creates a window of `days` days.
    pub fn days(days: u64) -> Self {
        Self { days }
    }

    /// Returns the window length in days.
    pub fn in_days(&self) -> u64 {
        self.days
    }

    /// Returns the cutoff, in seconds since the Unix epoch, for a sweep at `now`.
    pub fn cutoff(&self, now: i64) -> i64 {
        let span = i64::try_from(self.days)
            .unwrap_or(i64::MAX)
            .saturating_mul(SECONDS_PER_DAY);
        now.saturating_sub(span)
    }

    /// Returns `true` if a file last modified at `mtime` is strictly older
    /// than the window at `now`.
    ///
    /// ```rust
    /// use dirzip::RetentionWindow;
    ///
    /// let window = RetentionWindow::days(1);
    /// let now = 1_000_000;
    /// assert!(window.is_stale(now - 86_401, now));
    /// assert!(!window.is_stale(now - 86_400, now));
    /// ```
    pub fn is_stale(&self, mtime: i64, now: i64) -> bool {
        mtime < self.cutoff(now)
    }
}

/// Outcome of a sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepResult {
    /// Files whose modification time was checked.
    pub examined: usize,
    /// Stale files deleted.
    pub deleted: usize,
    /// Files that could not be inspected or deleted.
    pub failed: usize,
}

/// Deletes files older than a [`RetentionWindow`] below a root directory.
#[derive(Debug, Clone)]
pub struct RetentionSweeper {
    window: RetentionWindow,
    recursive: bool,
}

impl RetentionSweeper {
    /// Creates a sweeper that only looks at direct children of the root.
    pub fn new(window: RetentionWindow) -> Self {
        Self {
            window,
            recursive: false,
        }
    }

    /// Sets whether subdirectories are swept too.
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Sweeps `root` using the current system time.
    ///
    /// A root that is not a directory yields an empty result and touches
    /// nothing.
    pub fn sweep(&self, root: impl AsRef<Path>) -> SweepResult {
        self.sweep_at(root, unix_now())
    }

    /// Sweeps `root` as if the current time were `now` (Unix seconds).
    pub fn sweep_at(&self, root: impl AsRef<Path>, now: i64) -> SweepResult {
        let root = root.as_ref();
        let mut result = SweepResult::default();
        if !fsops::is_directory(root) {
            log::debug!("retention root is not a directory: {}", root.display());
            return result;
        }

        let files = list(root, Role::Files, &ListOptions::new().recursive(self.recursive));
        for entry in files.entries() {
            result.examined += 1;
            let mtime = match fsops::last_write_time(&entry.native) {
                Ok(mtime) => mtime,
                Err(e) => {
                    log::error!("cannot read modification time of {}: {}", entry.absolute, e);
                    result.failed += 1;
                    continue;
                }
            };
            if !self.window.is_stale(mtime, now) {
                continue;
            }
            match fsops::erase_file(&entry.native) {
                Ok(true) => {
                    log::debug!("deleted stale file {}", entry.absolute);
                    result.deleted += 1;
                }
                Ok(false) => log::debug!("stale file already gone: {}", entry.absolute),
                Err(e) => {
                    log::error!("cannot delete {}: {}", entry.absolute, e);
                    result.failed += 1;
                }
            }
        }
        result
    }
}

/// Deletes files under `root` not modified within the last `keep_days` days.
///
/// Returns the number of files deleted. Failures are logged and not counted.
pub fn clean_up_files(root: impl AsRef<Path>, keep_days: u64, recursive: bool) -> usize {
    RetentionSweeper::new(RetentionWindow::days(keep_days))
        .recursive(recursive)
        .sweep(root)
        .deleted
}

fn unix_now() -> i64 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(elapsed) => i64::try_from(elapsed.as_secs()).unwrap_or(i64::MAX),
        Err(before) => -i64::try_from(before.duration().as_secs()).unwrap_or(i64::MAX),
    }
}
