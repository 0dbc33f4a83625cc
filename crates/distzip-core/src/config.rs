//! Pattern-list file loading.
//!
//! The format is one pattern per line. Blank lines and lines starting with
//! `#` are ignored; surrounding whitespace is trimmed.
//!
//! ```text
//! # comment lines start with '#', blank lines ignored
//! images/**/*.png
//! dist/**/*.js:!*.min.js
//! ```

use crate::DistzipError;
use crate::Result;
use std::fs;
use std::path::Path;

/// Ordered list of raw pattern strings read from a configuration file.
///
/// Order is preserved: it determines archive insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternList {
    patterns: Vec<String>,
}

impl PatternList {
    /// Loads a pattern list from a file.
    ///
    /// # Errors
    ///
    /// - [`DistzipError::ConfigNotFound`] if `path` does not exist
    /// - [`DistzipError::Io`] if the file cannot be read or is not UTF-8
    /// - [`DistzipError::EmptyConfig`] if no patterns remain after filtering
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(DistzipError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = fs::read_to_string(path)?;
        let list = Self::parse(&content)?;
        tracing::debug!(
            path = %path.display(),
            patterns = list.len(),
            "loaded pattern list"
        );
        Ok(list)
    }

    /// Parses a pattern list from text.
    ///
    /// # Examples
    ///
    /// ```
    /// use distzip_core::PatternList;
    ///
    /// let list = PatternList::parse("# assets\n\n  images/*.png  \ndist/*.js:!*.min.js\n")?;
    /// assert_eq!(list.as_slice(), ["images/*.png", "dist/*.js:!*.min.js"]);
    /// # Ok::<(), distzip_core::DistzipError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`DistzipError::EmptyConfig`] if every line is blank or a
    /// comment.
    pub fn parse(content: &str) -> Result<Self> {
        let patterns: Vec<String> = content
            .lines()
            .map(trim_line)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect();

        if patterns.is_empty() {
            return Err(DistzipError::EmptyConfig);
        }

        Ok(Self { patterns })
    }

    /// Returns the patterns in file order.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.patterns
    }

    /// Returns the number of patterns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Always `false` for a successfully loaded list.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Returns an iterator over the patterns.
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.patterns.iter()
    }
}

impl<'a> IntoIterator for &'a PatternList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// A byte-order mark left by some editors is trimmed like whitespace.
fn trim_line(line: &str) -> &str {
    line.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}
