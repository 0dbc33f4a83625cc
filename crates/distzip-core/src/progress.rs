//! Progress reporting for archive builds.

use crate::Pattern;
use crate::Summary;

/// Callback trait for observing an archive build.
///
/// Callbacks arrive in order: for every pattern `on_pattern_start`, then one
/// `on_entry_added` per file, then `on_pattern_resolved`; after the last
/// pattern `on_finalize`, and `on_complete` once the archive is on disk.
///
/// # Examples
///
/// ```
/// use distzip_core::BuildProgress;
/// use distzip_core::Pattern;
/// use distzip_core::Summary;
///
/// struct PrintProgress;
///
/// impl BuildProgress for PrintProgress {
///     fn on_pattern_start(&mut self, pattern: &Pattern, current: usize, total: usize) {
///         println!("[{current}/{total}] {pattern}");
///     }
///
///     fn on_pattern_resolved(&mut self, pattern: &Pattern, matched: usize) {
///         println!("Pattern \"{pattern}\" matched {matched} files.");
///     }
///
///     fn on_entry_added(&mut self, _name: &str, _bytes: u64) {}
///
///     fn on_finalize(&mut self) {}
///
///     fn on_complete(&mut self, summary: &Summary) {
///         println!("{} files", summary.total_files);
///     }
/// }
/// ```
pub trait BuildProgress {
    /// Called before a pattern is resolved.
    ///
    /// `current` is 1-indexed.
    fn on_pattern_start(&mut self, pattern: &Pattern, current: usize, total: usize);

    /// Called after every file of a pattern has been added.
    fn on_pattern_resolved(&mut self, pattern: &Pattern, matched: usize);

    /// Called after a file has been streamed into the archive.
    ///
    /// `bytes` is the uncompressed size; it is 0 for a skipped duplicate.
    fn on_entry_added(&mut self, name: &str, bytes: u64);

    /// Called once all patterns are processed, before the archive is
    /// finalized.
    fn on_finalize(&mut self);

    /// Called once the archive has been written and its size is known.
    fn on_complete(&mut self, summary: &Summary);
}

/// No-op implementation of `BuildProgress`.
#[derive(Debug, Default)]
pub struct NoopProgress;

impl BuildProgress for NoopProgress {
    fn on_pattern_start(&mut self, _pattern: &Pattern, _current: usize, _total: usize) {}

    fn on_pattern_resolved(&mut self, _pattern: &Pattern, _matched: usize) {}

    fn on_entry_added(&mut self, _name: &str, _bytes: u64) {}

    fn on_finalize(&mut self) {}

    fn on_complete(&mut self, _summary: &Summary) {}
}
