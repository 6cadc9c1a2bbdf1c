//! Progress and error reporting for archive operations.
//!
//! Multi-entry operations report to a [`ProgressReporter`] synchronously, on
//! the calling thread, strictly in entry-processing order:
//!
//! - [`on_total`](ProgressReporter::on_total) once, with the uncompressed size
//!   of all file entries, before the first entry is touched
//! - [`on_entry_start`](ProgressReporter::on_entry_start) /
//!   [`on_entry_complete`](ProgressReporter::on_entry_complete) around each entry
//! - [`on_progress`](ProgressReporter::on_progress) after a file entry has been
//!   written completely, never mid-entry
//! - [`on_error`](ProgressReporter::on_error) for every per-entry failure that
//!   did not abort the operation
//!
//! Every method has a no-op default, so a reporter only implements what it
//! cares about.
//!
//! # Example
//!
//! ```rust,no_run
//! use dirzip::progress::{callbacks, format_bytes_iec};
//!
//! let mut reporter = callbacks(
//!     |written, total| println!("{} / {}", format_bytes_iec(written), format_bytes_iec(total)),
//!     |message| eprintln!("{}", message),
//! );
//! let result = dirzip::extract_all("./out", "bundle.zip", &mut reporter)?;
//! println!("complete: {}", result.is_complete());
//! # Ok::<(), dirzip::Error>(())
//! ```

/// IEC byte unit: 1 KiB = 1024 bytes.
pub const BYTES_KIB: u64 = 1024;
/// IEC byte unit: 1 MiB = 1024 KiB.
pub const BYTES_MIB: u64 = 1024 * BYTES_KIB;

// Floating point versions for formatting calculations
const BYTES_KB: f64 = 1024.0;
const BYTES_MB: f64 = BYTES_KB * 1024.0;
const BYTES_GB: f64 = BYTES_MB * 1024.0;

/// Receiver for progress and per-entry error notifications.
pub trait ProgressReporter {
    /// Called once before processing starts, with the total bytes to write.
    fn on_total(&mut self, total_bytes: u64) {
        let _ = total_bytes;
    }

    /// Called after an entry's content has been fully written.
    ///
    /// `bytes_written` is cumulative over the whole operation.
    fn on_progress(&mut self, bytes_written: u64, total_bytes: u64) {
        let _ = (bytes_written, total_bytes);
    }

    /// Called when starting to process a new entry (file or directory marker).
    fn on_entry_start(&mut self, entry_name: &str, size: u64) {
        let _ = (entry_name, size);
    }

    /// Called when entry processing completes, successfully or not.
    fn on_entry_complete(&mut self, entry_name: &str, success: bool) {
        let _ = (entry_name, success);
    }

    /// Called for a failure that was skipped over.
    ///
    /// The message names the offending path and the operation that failed.
    fn on_error(&mut self, message: &str) {
        let _ = message;
    }
}

/// Progress state collected by [`StatisticsProgress`].
#[derive(Debug, Clone, Default)]
pub struct ProgressState {
    /// Total bytes to write.
    pub total_bytes: u64,
    /// Bytes written so far.
    pub written_bytes: u64,
    /// Current entry being processed.
    pub current_entry: Option<String>,
    /// Number of entries processed.
    pub entries_processed: usize,
    /// Number of entries that completed successfully.
    pub entries_succeeded: usize,
}

/// A progress reporter that does nothing (null object pattern).
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressReporter for NoProgress {}

/// A progress reporter that collects statistics and error messages.
#[derive(Debug, Default, Clone)]
pub struct StatisticsProgress {
    /// The progress state.
    pub state: ProgressState,
    /// Every `(bytes_written, total_bytes)` pair seen, in order.
    pub updates: Vec<(u64, u64)>,
    /// Error messages collected.
    pub errors: Vec<String>,
}

impl StatisticsProgress {
    /// Creates a new statistics progress reporter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the collected state.
    pub fn state(&self) -> &ProgressState {
        &self.state
    }
}

impl ProgressReporter for StatisticsProgress {
    fn on_total(&mut self, total_bytes: u64) {
        self.state.total_bytes = total_bytes;
    }

    fn on_progress(&mut self, bytes_written: u64, total_bytes: u64) {
        self.state.written_bytes = bytes_written;
        self.updates.push((bytes_written, total_bytes));
    }

    fn on_entry_start(&mut self, entry_name: &str, _size: u64) {
        self.state.current_entry = Some(entry_name.to_string());
    }

    fn on_entry_complete(&mut self, _entry_name: &str, success: bool) {
        self.state.entries_processed += 1;
        if success {
            self.state.entries_succeeded += 1;
        }
        self.state.current_entry = None;
    }

    fn on_error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }
}

/// A reporter built from a progress closure and an error closure.
pub struct Callbacks<P, E> {
    progress: P,
    error: E,
}

impl<P, E> ProgressReporter for Callbacks<P, E>
where
    P: FnMut(u64, u64),
    E: FnMut(&str),
{
    fn on_progress(&mut self, bytes_written: u64, total_bytes: u64) {
        (self.progress)(bytes_written, total_bytes)
    }

    fn on_error(&mut self, message: &str) {
        (self.error)(message)
    }
}

/// Creates a reporter from a progress closure `(bytes_written, total_bytes)`
/// and an error closure `(message)`.
pub fn callbacks<P, E>(progress: P, error: E) -> Callbacks<P, E>
where
    P: FnMut(u64, u64),
    E: FnMut(&str),
{
    Callbacks { progress, error }
}

/// Creates a closure-based reporter that only listens to progress.
pub fn progress_fn<P>(progress: P) -> Callbacks<P, fn(&str)>
where
    P: FnMut(u64, u64),
{
    let ignore: fn(&str) = |_| {};
    callbacks(progress, ignore)
}

/// Creates a closure-based reporter that only listens to errors.
pub fn error_fn<E>(error: E) -> Callbacks<fn(u64, u64), E>
where
    E: FnMut(&str),
{
    let ignore: fn(u64, u64) = |_, _| {};
    callbacks(ignore, error)
}

/// Formats bytes as a human-readable string using IEC units (KiB, MiB, GiB).
///
/// # Examples
///
/// ```rust
/// use dirzip::progress::format_bytes_iec;
///
/// assert_eq!(format_bytes_iec(0), "0 B");
/// assert_eq!(format_bytes_iec(512), "512 B");
/// assert_eq!(format_bytes_iec(1024), "1.0 KiB");
/// assert_eq!(format_bytes_iec(1536), "1.5 KiB");
/// assert_eq!(format_bytes_iec(1048576), "1.0 MiB");
/// ```
pub fn format_bytes_iec(bytes: u64) -> String {
    let bytes_f64 = bytes as f64;
    if bytes_f64 < BYTES_KB {
        format!("{} B", bytes)
    } else if bytes_f64 < BYTES_MB {
        format!("{:.1} KiB", bytes_f64 / BYTES_KB)
    } else if bytes_f64 < BYTES_GB {
        format!("{:.1} MiB", bytes_f64 / BYTES_MB)
    } else {
        format!("{:.1} GiB", bytes_f64 / BYTES_GB)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statistics_progress() {
        let mut progress = StatisticsProgress::new();
        progress.on_total(1000);
        progress.on_entry_start("test.txt", 500);
        progress.on_progress(500, 1000);
        progress.on_entry_complete("test.txt", true);
        progress.on_entry_start("broken.txt", 500);
        progress.on_error("write failed: broken.txt");
        progress.on_entry_complete("broken.txt", false);

        assert_eq!(progress.state().total_bytes, 1000);
        assert_eq!(progress.state().written_bytes, 500);
        assert_eq!(progress.state().entries_processed, 2);
        assert_eq!(progress.state().entries_succeeded, 1);
        assert_eq!(progress.updates, vec![(500, 1000)]);
        assert_eq!(progress.errors.len(), 1);
    }

    #[test]
    fn test_callbacks() {
        let mut updates = Vec::new();
        let mut errors = Vec::new();
        {
            let mut reporter = callbacks(
                |written, total| updates.push((written, total)),
                |msg: &str| errors.push(msg.to_string()),
            );
            reporter.on_progress(10, 20);
            reporter.on_error("boom");
            reporter.on_progress(20, 20);
        }
        assert_eq!(updates, vec![(10, 20), (20, 20)]);
        assert_eq!(errors, vec!["boom".to_string()]);
    }

    #[test]
    fn test_progress_fn_ignores_errors() {
        let mut count = 0;
        let mut reporter = progress_fn(|_, _| count += 1);
        reporter.on_error("ignored");
        reporter.on_progress(1, 1);
        drop(reporter);
        assert_eq!(count, 1);
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes_iec(500), "500 B");
        assert_eq!(format_bytes_iec(1500), "1.5 KiB");
        assert_eq!(format_bytes_iec(1500 * 1024), "1.5 MiB");
        assert_eq!(format_bytes_iec(1500 * 1024 * 1024), "1.5 GiB");
    }
}
