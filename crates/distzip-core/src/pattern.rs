//! Pattern compilation.
//!
//! A pattern is either a plain glob (`images/**/*.png`) or an include glob
//! followed by an exclude filter after the `:!` separator
//! (`dist/**/*.js:!*.min.js`). The exclude filter only looks at the base
//! name of each candidate.

use crate::DistzipError;
use crate::Result;
use globset::GlobBuilder;
use globset::GlobMatcher;
use regex::Regex;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

/// Token separating the include glob from the exclude filter.
pub const EXCLUDE_SEPARATOR: &str = ":!";

const GLOB_META: &[char] = &['*', '?', '[', ']', '{', '}', '\\'];

/// A compiled line of the pattern list.
///
/// # Examples
///
/// ```
/// use distzip_core::Pattern;
/// use std::path::Path;
///
/// let pattern = Pattern::parse("dist/**/*.js:!*.min.js")?;
/// assert!(pattern.is_include_exclude());
/// assert!(pattern.excludes(Path::new("dist/vendor/jquery.min.js")));
/// assert!(!pattern.excludes(Path::new("dist/app.js")));
/// # Ok::<(), distzip_core::DistzipError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Pattern {
    raw: String,
    include: IncludeGlob,
    exclude: Option<ExcludeMatcher>,
}

impl Pattern {
    /// Compiles a raw pattern line.
    ///
    /// Only the first `:!` splits the line; anything after it belongs to the
    /// exclude filter.
    ///
    /// # Errors
    ///
    /// Returns [`DistzipError::InvalidPattern`] if the include glob is
    /// malformed, absolute, or climbs out of the root with `..`.
    pub fn parse(raw: &str) -> Result<Self> {
        let (include, exclude) = match raw.split_once(EXCLUDE_SEPARATOR) {
            Some((include, exclude)) => (include, Some(exclude)),
            None => (raw, None),
        };

        let include = IncludeGlob::compile(include)
            .map_err(|reason| DistzipError::invalid_pattern(raw, reason))?;
        let exclude = exclude
            .map(ExcludeMatcher::compile)
            .transpose()
            .map_err(|reason| DistzipError::invalid_pattern(raw, reason))?;

        Ok(Self {
            raw: raw.to_string(),
            include,
            exclude,
        })
    }

    /// Returns the pattern exactly as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns the include glob.
    #[must_use]
    pub fn include(&self) -> &IncludeGlob {
        &self.include
    }

    /// Returns the exclude filter, if the pattern has one.
    #[must_use]
    pub fn exclude(&self) -> Option<&ExcludeMatcher> {
        self.exclude.as_ref()
    }

    /// Whether this is an include-exclude pattern.
    #[must_use]
    pub fn is_include_exclude(&self) -> bool {
        self.exclude.is_some()
    }

    /// Returns `true` if the exclude filter drops `path`.
    ///
    /// Always `false` for simple patterns.
    #[must_use]
    pub fn excludes(&self, path: &Path) -> bool {
        self.exclude
            .as_ref()
            .is_some_and(|exclude| exclude.matches_path(path))
    }
}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Include half of a pattern: a glob relative to the root directory.
///
/// Wildcards follow the usual dot-file rule: `*`, `?`, classes and `**`
/// never match a name starting with `.`. A hidden name is only reached
/// through a glob segment that itself starts with `.`.
#[derive(Debug, Clone)]
pub struct IncludeGlob {
    text: String,
    matcher: Option<GlobMatcher>,
    segments: Vec<Segment>,
    base: PathBuf,
}

impl IncludeGlob {
    /// Compiles a glob.
    ///
    /// # Errors
    ///
    /// Returns [`DistzipError::InvalidPattern`] for malformed, absolute or
    /// parent-relative globs.
    pub fn new(text: &str) -> Result<Self> {
        Self::compile(text).map_err(|reason| DistzipError::invalid_pattern(text, reason))
    }

    fn compile(text: &str) -> std::result::Result<Self, String> {
        if text.starts_with('/') || Path::new(text).is_absolute() {
            return Err("absolute patterns are not supported".to_string());
        }
        if Path::new(text)
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)))
        {
            return Err("patterns may not leave the working directory".to_string());
        }

        // `./`, `.` segments and repeated `/` carry no meaning.
        let segments = split_segments(text);
        let text = segments.join("/");

        let literal_len = segments
            .iter()
            .take_while(|segment| !segment.contains(GLOB_META))
            .count();

        let matcher = if literal_len == segments.len() {
            None
        } else {
            let glob = GlobBuilder::new(&text)
                .literal_separator(true)
                .backslash_escape(true)
                .build()
                .map_err(|e| e.to_string())?;
            Some(glob.compile_matcher())
        };

        // For a literal glob the last segment is the file itself.
        let base_len = if matcher.is_some() {
            literal_len
        } else {
            literal_len.saturating_sub(1)
        };
        let base = segments[..base_len].iter().collect::<PathBuf>();

        Ok(Self {
            matcher,
            segments: segments.iter().copied().map(Segment::compile).collect(),
            base,
            text,
        })
    }

    /// Returns the normalized glob text (`.` segments and repeated `/`
    /// removed).
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Whether the glob contains no wildcards and names a single path.
    #[must_use]
    pub fn is_literal(&self) -> bool {
        self.matcher.is_none()
    }

    /// Longest leading run of literal directories; resolution only walks
    /// below this directory.
    #[must_use]
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Whether some segment of the glob itself starts with `.`.
    #[must_use]
    pub fn names_hidden(&self) -> bool {
        self.segments
            .iter()
            .any(|segment| matches!(segment, Segment::Part { dot: true, .. }))
    }

    /// Tests a `/`-separated relative path against the glob.
    ///
    /// Dot-file rules are not applied here; see [`IncludeGlob::admits`].
    #[must_use]
    pub fn is_match(&self, relative: &str) -> bool {
        match &self.matcher {
            Some(matcher) => matcher.is_match(relative),
            None => relative == self.text,
        }
    }

    /// Whether a path given as its names can match the glob when hidden
    /// names may only be consumed by segments starting with `.`.
    #[must_use]
    pub fn admits<S: AsRef<str>>(&self, names: &[S]) -> bool {
        self.reachable(names)[self.segments.len()]
    }

    /// Whether some path starting with `names` could still be admitted.
    /// Used to prune hidden directories during a walk.
    #[must_use]
    pub fn admits_prefix<S: AsRef<str>>(&self, names: &[S]) -> bool {
        self.reachable(names).contains(&true)
    }

    // Segment positions reachable after consuming `names`, one flag per
    // position plus the accepting position at the end.
    fn reachable<S: AsRef<str>>(&self, names: &[S]) -> Vec<bool> {
        let len = self.segments.len();
        let mut states = vec![false; len + 1];
        states[0] = true;
        self.skip_globstars(&mut states);

        for name in names {
            let name = name.as_ref();
            let mut next = vec![false; len + 1];
            for (idx, segment) in self.segments.iter().enumerate() {
                if !states[idx] {
                    continue;
                }
                match segment {
                    Segment::Globstar => next[idx] |= !name.starts_with('.'),
                    Segment::Part { .. } => next[idx + 1] |= segment.accepts(name),
                }
            }
            self.skip_globstars(&mut next);
            states = next;
        }

        states
    }

    // `**` also matches zero names.
    fn skip_globstars(&self, states: &mut [bool]) {
        for (idx, segment) in self.segments.iter().enumerate() {
            if states[idx] && matches!(segment, Segment::Globstar) {
                states[idx + 1] = true;
            }
        }
    }
}

/// One `/`-separated piece of an include glob.
#[derive(Debug, Clone)]
enum Segment {
    Globstar,
    Part { dot: bool, matcher: SegmentMatcher },
}

#[derive(Debug, Clone)]
enum SegmentMatcher {
    Literal(String),
    Glob(GlobMatcher),
    // Only valid as part of the whole glob, e.g. a brace alternative
    // containing `/`.
    Any,
}

impl Segment {
    fn compile(text: &str) -> Self {
        if text == "**" {
            return Self::Globstar;
        }

        let matcher = if text.contains(GLOB_META) {
            GlobBuilder::new(text)
                .literal_separator(true)
                .backslash_escape(true)
                .build()
                .map_or(SegmentMatcher::Any, |glob| {
                    SegmentMatcher::Glob(glob.compile_matcher())
                })
        } else {
            SegmentMatcher::Literal(text.to_string())
        };

        Self::Part {
            dot: text.starts_with('.'),
            matcher,
        }
    }

    fn accepts(&self, name: &str) -> bool {
        let Self::Part { dot, matcher } = self else {
            return false;
        };
        if name.starts_with('.') && !dot {
            return false;
        }
        match matcher {
            SegmentMatcher::Literal(text) => text == name,
            SegmentMatcher::Glob(glob) => glob.is_match(name),
            SegmentMatcher::Any => true,
        }
    }
}

// Splits on `/` outside braces, dropping empty and `.` segments.
fn split_segments(text: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut escaped = false;
    let mut start = 0;

    for (idx, c) in text.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            '/' if depth == 0 => {
                segments.push(&text[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    segments.push(&text[start..]);

    segments
        .into_iter()
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect()
}

/// Exclude half of a pattern, matched against base names.
///
/// Every `*` matches any run of characters; everything else is literal.
/// The match is unanchored, so `min` drops `jquery.min.js` as well as
/// `admin.js`.
///
/// # Examples
///
/// ```
/// use distzip_core::ExcludeMatcher;
///
/// let exclude = ExcludeMatcher::new("*2*")?;
/// assert!(exclude.is_match("2.txt"));
/// assert!(!exclude.is_match("1.txt"));
/// # Ok::<(), distzip_core::DistzipError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ExcludeMatcher {
    text: String,
    regex: Regex,
}

impl ExcludeMatcher {
    /// Compiles an exclude filter.
    ///
    /// # Errors
    ///
    /// Returns [`DistzipError::InvalidPattern`] if the expression is too
    /// large to compile.
    pub fn new(text: &str) -> Result<Self> {
        Self::compile(text).map_err(|reason| DistzipError::invalid_pattern(text, reason))
    }

    fn compile(text: &str) -> std::result::Result<Self, String> {
        let expr = text
            .split('*')
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join(".*");
        let regex = Regex::new(&expr).map_err(|e| e.to_string())?;
        Ok(Self {
            text: text.to_string(),
            regex,
        })
    }

    /// Returns the filter as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Tests a base name.
    #[must_use]
    pub fn is_match(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }

    /// Tests the final segment of `path`.
    #[must_use]
    pub fn matches_path(&self, path: &Path) -> bool {
        path.file_name()
            .is_some_and(|name| self.is_match(&name.to_string_lossy()))
    }
}
