//! Options for archive building.

use crate::DistzipError;
use crate::Result;

/// Highest Deflate level; every entry is written at this level by default.
pub const MAX_COMPRESSION_LEVEL: u8 = 9;

/// Options controlling pattern resolution and compression.
///
/// # Examples
///
/// ```
/// use distzip_core::BuildOptions;
///
/// let options = BuildOptions::default()
///     .with_include_hidden(true)
///     .with_compression_level(6);
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    /// Deflate level applied to every entry (0 stores without compression).
    ///
    /// Default: `9`.
    pub compression_level: u8,

    /// Let wildcards match files and directories whose name starts with `.`.
    ///
    /// A glob segment that itself starts with `.` always matches hidden
    /// names. Default: `false`.
    pub include_hidden: bool,

    /// Descend into symlinked directories while expanding `**`.
    ///
    /// Default: `false`.
    pub follow_symlinks: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            compression_level: MAX_COMPRESSION_LEVEL,
            include_hidden: false,
            follow_symlinks: false,
        }
    }
}

impl BuildOptions {
    /// Creates options with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the compression level (0-9).
    #[must_use]
    pub fn with_compression_level(mut self, level: u8) -> Self {
        self.compression_level = level;
        self
    }

    /// Sets whether hidden files are matched by wildcards.
    #[must_use]
    pub fn with_include_hidden(mut self, include: bool) -> Self {
        self.include_hidden = include;
        self
    }

    /// Sets whether symlinked directories are traversed.
    #[must_use]
    pub fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Checks that the options are usable.
    ///
    /// # Errors
    ///
    /// Returns an error if `compression_level` is above 9.
    pub fn validate(&self) -> Result<()> {
        if self.compression_level > MAX_COMPRESSION_LEVEL {
            return Err(DistzipError::InvalidOptions(format!(
                "compression level {} out of range (0-{MAX_COMPRESSION_LEVEL})",
                self.compression_level
            )));
        }
        Ok(())
    }
}
