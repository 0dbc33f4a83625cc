//! Build summary reporting.

use std::time::Duration;

/// Result of a successful archive build.
///
/// `total_files` counts add operations: a file selected by two patterns is
/// counted twice even though the archive stores it once.
///
/// # Examples
///
/// ```
/// use distzip_core::Summary;
///
/// let mut summary = Summary::new();
/// summary.record_pattern("a/*.txt", 2);
/// summary.record_pattern("a/1.txt", 1);
///
/// assert_eq!(summary.matched_files(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Summary {
    /// Number of add operations performed.
    pub total_files: usize,

    /// Size of the finished archive in bytes.
    pub size_bytes: u64,

    /// Uncompressed bytes read from source files.
    pub bytes_read: u64,

    /// Add operations whose entry name was already in the archive.
    pub duplicates_skipped: usize,

    /// Matches dropped because they were the output archive itself.
    pub self_skipped: usize,

    /// Per-pattern match counts, in pattern order.
    pub patterns: Vec<PatternSummary>,

    /// Duration of the build.
    pub duration: Duration,

    /// Warnings generated during the build.
    pub warnings: Vec<String>,
}

/// Match count of one pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternSummary {
    /// The pattern as written in the configuration.
    pub pattern: String,
    /// Files the pattern contributed.
    pub matched: usize,
}

impl Summary {
    /// Creates an empty summary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the match count of a pattern.
    pub fn record_pattern(&mut self, pattern: impl Into<String>, matched: usize) {
        self.patterns.push(PatternSummary {
            pattern: pattern.into(),
            matched,
        });
    }

    /// Sum of per-pattern match counts.
    #[must_use]
    pub fn matched_files(&self) -> usize {
        self.patterns.iter().map(|p| p.matched).sum()
    }

    /// Number of distinct entries stored in the archive.
    #[must_use]
    pub fn entries_written(&self) -> usize {
        self.total_files - self.duplicates_skipped
    }

    /// Adds a warning message.
    pub fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    /// Returns whether any warnings were generated.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Ratio of archive size to uncompressed input, as a percentage saved.
    ///
    /// Returns 0.0 when nothing was read.
    #[must_use]
    pub fn compression_percentage(&self) -> f64 {
        if self.bytes_read == 0 {
            return 0.0;
        }
        let ratio = self.size_bytes as f64 / self.bytes_read as f64;
        (1.0 - ratio) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_summary_is_empty() {
        let summary = Summary::new();
        assert_eq!(summary.total_files, 0);
        assert_eq!(summary.size_bytes, 0);
        assert!(summary.patterns.is_empty());
        assert!(!summary.has_warnings());
    }

    #[test]
    fn test_matched_files_sums_patterns() {
        let mut summary = Summary::new();
        summary.record_pattern("a/*", 3);
        summary.record_pattern("b/*", 0);
        summary.record_pattern("a/1", 1);
        assert_eq!(summary.matched_files(), 4);
        assert_eq!(summary.patterns[1].pattern, "b/*");
    }

    #[test]
    fn test_entries_written_excludes_duplicates() {
        let summary = Summary {
            total_files: 5,
            duplicates_skipped: 2,
            ..Summary::default()
        };
        assert_eq!(summary.entries_written(), 3);
    }

    #[test]
    fn test_compression_percentage() {
        let mut summary = Summary::new();
        assert!(summary.compression_percentage().abs() < f64::EPSILON);

        summary.bytes_read = 1000;
        summary.size_bytes = 250;
        assert!((summary.compression_percentage() - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_warnings() {
        let mut summary = Summary::new();
        summary.add_warning("duplicate entry skipped: a.txt");
        assert!(summary.has_warnings());
        assert_eq!(summary.warnings.len(), 1);
    }
}
