//! Spinner shown while an archive is being built.

use crate::output::HumanFormatter;
use crate::output::format_bytes;
use console::Term;
use console::style;
use distzip_core::BuildProgress;
use distzip_core::Pattern;
use distzip_core::Summary;
use indicatif::ProgressBar;
use indicatif::ProgressStyle;
use std::io;
use std::io::Write;
use std::time::Duration;
use tracing_subscriber::fmt::MakeWriter;

const TICK_STRINGS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "✔"];

/// Creates the spinner; hidden unless stderr is a terminal.
pub fn spinner() -> ProgressBar {
    let bar = if should_show() {
        ProgressBar::new_spinner()
    } else {
        ProgressBar::hidden()
    };

    bar.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(TICK_STRINGS),
    );
    bar
}

/// Checks if we should show the spinner (TTY detection).
pub fn should_show() -> bool {
    Term::stderr().is_term()
}

/// CLI spinner implementing `BuildProgress`.
///
/// Status lines printed through [`CliProgress::info`] suspend the spinner
/// so they never interleave with it.
pub struct CliProgress<'a> {
    bar: ProgressBar,
    formatter: &'a HumanFormatter,
    message: String,
    files: usize,
    bytes_read: u64,
}

impl<'a> CliProgress<'a> {
    pub fn new(bar: ProgressBar, message: &str, formatter: &'a HumanFormatter) -> Self {
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));

        Self {
            bar,
            formatter,
            message: message.to_string(),
            files: 0,
            bytes_read: 0,
        }
    }

    /// Prints a status line above the spinner.
    pub fn info(&self, message: &str) {
        self.bar.suspend(|| self.formatter.format_info(message));
    }

    /// Stops the spinner in the success state.
    pub fn succeed(&self) {
        self.bar.finish_with_message(self.message.clone());
    }

    /// Stops the spinner in the failed state. Must run before the error is
    /// printed.
    pub fn fail(&self) {
        let plain = ProgressStyle::with_template("{msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        self.bar.set_style(plain);
        self.bar.abandon_with_message(format!("{} {}", style("✖").red(), self.message));
    }
}

impl Drop for CliProgress<'_> {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}

impl BuildProgress for CliProgress<'_> {
    fn on_pattern_start(&mut self, pattern: &Pattern, current: usize, total: usize) {
        self.bar.set_message(format!("{} [{current}/{total}] {pattern}", self.message));
    }

    fn on_pattern_resolved(&mut self, pattern: &Pattern, matched: usize) {
        if self.formatter.is_verbose() {
            self.info(&format!("Pattern \"{pattern}\" matched {matched} files."));
        }
    }

    fn on_entry_added(&mut self, _name: &str, bytes: u64) {
        self.files += 1;
        self.bytes_read += bytes;
        self.bar.set_message(format!(
            "{} {} files ({})",
            self.message,
            self.files,
            format_bytes(self.bytes_read)
        ));
    }

    fn on_finalize(&mut self) {
        self.bar.set_message(format!("{} finalizing", self.message));
    }

    fn on_complete(&mut self, _summary: &Summary) {}
}

/// `MakeWriter` for the tracing subscriber that prints each event on
/// stderr with the spinner suspended.
#[derive(Clone)]
pub struct SpinnerWriter {
    bar: ProgressBar,
}

impl SpinnerWriter {
    pub fn new(bar: ProgressBar) -> Self {
        Self { bar }
    }
}

impl<'a> MakeWriter<'a> for SpinnerWriter {
    type Writer = SuspendedStderr;

    fn make_writer(&'a self) -> Self::Writer {
        SuspendedStderr {
            bar: self.bar.clone(),
            buf: Vec::new(),
        }
    }
}

/// Buffers one event and writes it out when dropped.
pub struct SuspendedStderr {
    bar: ProgressBar,
    buf: Vec<u8>,
}

impl Write for SuspendedStderr {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for SuspendedStderr {
    fn drop(&mut self) {
        if self.buf.is_empty() {
            return;
        }
        self.bar.suspend(|| {
            let _ = io::stderr().lock().write_all(&self.buf);
        });
    }
}
