//! Extraction result types.

/// Result of extracting every entry of an archive.
///
/// The extraction is complete only if every entry in the archive was
/// materialized; see [`is_complete`](Self::is_complete).
#[must_use = "extraction results should be checked for partial failures"]
#[derive(Debug, Clone, Default)]
pub struct ExtractResult {
    /// Number of entries in the archive.
    pub entries_total: usize,
    /// Number of entries materialized on disk.
    pub entries_extracted: usize,
    /// Directories created (explicit and inferred).
    pub directories_created: usize,
    /// Files written.
    pub files_written: usize,
    /// Uncompressed size of all file entries.
    pub bytes_total: u64,
    /// Bytes written to disk.
    pub bytes_written: u64,
    /// Detailed failures (entry name and error message).
    pub failures: Vec<(String, String)>,
}

impl ExtractResult {
    /// Returns `true` if every entry was extracted.
    pub fn is_complete(&self) -> bool {
        self.entries_extracted == self.entries_total
    }

    /// Returns the number of entries that were not extracted.
    pub fn entries_failed(&self) -> usize {
        self.entries_total.saturating_sub(self.entries_extracted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_result_is_complete() {
        let result = ExtractResult::default();
        assert!(result.is_complete());
        assert_eq!(result.entries_failed(), 0);
    }

    #[test]
    fn test_partial_result() {
        let result = ExtractResult {
            entries_total: 3,
            entries_extracted: 2,
            failures: vec![("a.txt".into(), "disk full".into())],
            ..Default::default()
        };
        assert!(!result.is_complete());
        assert_eq!(result.entries_failed(), 1);
    }
}
