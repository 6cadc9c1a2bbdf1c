//! Progress bar for CLI operations.

use indicatif::{ProgressBar, ProgressStyle};
use dirzip::progress::ProgressReporter;

/// Byte progress bar that also prints per-entry errors
pub struct CliProgress {
    bar: ProgressBar,
    errors: usize,
}

impl CliProgress {
    /// Creates a new progress display
    pub fn new(quiet: bool) -> Self {
        let bar = if quiet {
            ProgressBar::hidden()
        } else {
            let pb = ProgressBar::new(0);
            let style = ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} {wide_msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-");
            pb.set_style(style);
            pb
        };
        Self { bar, errors: 0 }
    }

    /// Returns the number of errors reported so far
    pub fn errors(&self) -> usize {
        self.errors
    }

    /// Finishes the progress display
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl ProgressReporter for CliProgress {
    fn on_total(&mut self, total_bytes: u64) {
        self.bar.set_length(total_bytes);
    }

    fn on_progress(&mut self, bytes_written: u64, _total_bytes: u64) {
        self.bar.set_position(bytes_written);
    }

    fn on_entry_start(&mut self, entry_name: &str, _size: u64) {
        // Truncate long names
        let display_name = if entry_name.chars().count() > 40 {
            let tail: String = entry_name
                .chars()
                .rev()
                .take(37)
                .collect::<Vec<_>>()
                .into_iter()
                .rev()
                .collect();
            format!("...{}", tail)
        } else {
            entry_name.to_string()
        };
        self.bar.set_message(display_name);
    }

    fn on_error(&mut self, message: &str) {
        self.errors += 1;
        self.bar.suspend(|| eprintln!("Error: {}", message));
    }
}
