//! Archive assembly from a pattern list.

use super::sink::AddOutcome;
use super::sink::ZipSink;
use super::sink::entry_name;
use crate::BuildOptions;
use crate::BuildProgress;
use crate::DistzipError;
use crate::NoopProgress;
use crate::Pattern;
use crate::Result;
use crate::Summary;
use crate::resolve;
use std::path::Path;
use std::path::PathBuf;
use std::time::Instant;

/// Builds a zip archive from patterns resolved against a root directory.
///
/// Patterns are processed strictly in order. Each matched file becomes one
/// add operation; files selected by several patterns are added once per
/// pattern, and the archive keeps the first entry for a repeated name.
///
/// # Examples
///
/// ```no_run
/// use distzip_core::ArchiveBuilder;
/// use distzip_core::BuildOptions;
///
/// let summary = ArchiveBuilder::new("project")
///     .with_options(BuildOptions::default().with_include_hidden(true))
///     .build(&["images/**/*.png", "dist/**/*.js:!*.min.js"], "dist/theme.zip")?;
/// println!("{} files, {} bytes", summary.total_files, summary.size_bytes);
/// # Ok::<(), distzip_core::DistzipError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ArchiveBuilder {
    root: PathBuf,
    options: BuildOptions,
}

impl ArchiveBuilder {
    /// Creates a builder rooted at `root` with default options.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            options: BuildOptions::default(),
        }
    }

    /// Replaces the build options.
    #[must_use]
    pub fn with_options(mut self, options: BuildOptions) -> Self {
        self.options = options;
        self
    }

    /// The directory patterns are resolved against.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The active build options.
    #[must_use]
    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Builds the archive at `output`.
    ///
    /// # Errors
    ///
    /// See [`ArchiveBuilder::build_with_progress`].
    pub fn build<S: AsRef<str>, P: AsRef<Path>>(
        &self,
        patterns: &[S],
        output: P,
    ) -> Result<Summary> {
        self.build_with_progress(patterns, output, &mut NoopProgress)
    }

    /// Builds the archive at `output`, reporting each step to `progress`.
    ///
    /// All patterns are compiled before any output is created, so a bad
    /// pattern never leaves files behind. Missing parent directories of
    /// `output` are created; an existing archive is replaced only after the
    /// new one is complete.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `patterns` is empty
    /// - a pattern fails to compile
    /// - the root directory does not exist
    /// - a source file cannot be read or the archive cannot be written
    pub fn build_with_progress<S: AsRef<str>, P: AsRef<Path>>(
        &self,
        patterns: &[S],
        output: P,
        progress: &mut dyn BuildProgress,
    ) -> Result<Summary> {
        self.options.validate()?;
        if patterns.is_empty() {
            return Err(DistzipError::EmptyConfig);
        }
        let patterns = patterns
            .iter()
            .map(|raw| Pattern::parse(raw.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        if !self.root.is_dir() {
            return Err(DistzipError::RootNotFound {
                path: self.root.clone(),
            });
        }

        let start = Instant::now();
        let mut sink = ZipSink::create(output.as_ref(), self.options.compression_level)?;
        let mut summary = Summary::new();
        let total = patterns.len();

        for (idx, pattern) in patterns.iter().enumerate() {
            progress.on_pattern_start(pattern, idx + 1, total);
            let matched = self.add_pattern(&mut sink, pattern, &mut summary, progress)?;
            summary.record_pattern(pattern.as_str(), matched);
            progress.on_pattern_resolved(pattern, matched);
        }

        progress.on_finalize();
        summary.size_bytes = sink.finish()?;
        summary.duration = start.elapsed();

        tracing::debug!(
            files = summary.total_files,
            bytes = summary.size_bytes,
            "archive complete"
        );
        progress.on_complete(&summary);

        Ok(summary)
    }

    fn add_pattern(
        &self,
        sink: &mut ZipSink,
        pattern: &Pattern,
        summary: &mut Summary,
        progress: &mut dyn BuildProgress,
    ) -> Result<usize> {
        let files = resolve(pattern, &self.root, &self.options)?;
        let mut matched = 0;

        for file in files {
            let source = self.root.join(&file);
            if sink.owns(&source) {
                tracing::debug!(path = %file.display(), "skipping the output archive itself");
                summary.self_skipped += 1;
                summary.add_warning(format!("Skipped output archive: {}", file.display()));
                continue;
            }

            let name = entry_name(&file)?;
            match sink.add_file(&source, &name)? {
                AddOutcome::Added { bytes } => {
                    summary.bytes_read += bytes;
                    progress.on_entry_added(&name, bytes);
                }
                AddOutcome::Duplicate => {
                    summary.duplicates_skipped += 1;
                    summary.add_warning(format!("Duplicate entry kept once: {name}"));
                    progress.on_entry_added(&name, 0);
                }
            }
            summary.total_files += 1;
            matched += 1;
        }

        Ok(matched)
    }
}
