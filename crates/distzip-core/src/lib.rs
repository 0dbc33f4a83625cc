//! Pattern-list driven zip packaging.
//!
//! `distzip-core` reads a list of glob patterns, resolves each one against a
//! working directory and streams the matched files into a zip archive.
//!
//! # Examples
//!
//! ```no_run
//! use distzip_core::ArchiveBuilder;
//! use distzip_core::PatternList;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let patterns = PatternList::load("project/.distzip")?;
//! let summary = ArchiveBuilder::new("project").build(patterns.as_slice(), "dist/theme.zip")?;
//! println!("Added {} files ({} bytes)", summary.total_files, summary.size_bytes);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod archive;
pub mod config;
pub mod error;
pub mod options;
pub mod pattern;
pub mod progress;
pub mod report;
pub mod resolve;

#[cfg(test)]
pub(crate) mod test_utils;

pub use archive::ArchiveBuilder;
pub use config::PatternList;
pub use error::DistzipError;
pub use error::Result;
pub use options::BuildOptions;
pub use pattern::ExcludeMatcher;
pub use pattern::IncludeGlob;
pub use pattern::Pattern;
pub use progress::BuildProgress;
pub use progress::NoopProgress;
pub use report::PatternSummary;
pub use report::Summary;
pub use resolve::resolve;
