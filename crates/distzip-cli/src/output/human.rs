//! Human-readable output formatter with colors and styling.

use console::Term;
use console::style;
use distzip_core::Summary;
use std::path::Path;

const PREFIX: &str = "distzip:";

pub struct HumanFormatter {
    verbose: bool,
    use_colors: bool,
    out: Term,
    err: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool) -> Self {
        Self {
            verbose,
            use_colors: console::colors_enabled(),
            out: Term::stdout(),
            err: Term::stderr(),
        }
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Prints an informational status line.
    pub fn format_info(&self, message: &str) {
        let _ = self.out.write_line(&format!("{PREFIX} {message}"));
    }

    /// Prints the success banner and totals.
    pub fn format_summary(&self, destination: &Path, summary: &Summary) {
        let size = format_bytes(summary.size_bytes);
        if self.use_colors {
            let _ = self.out.write_line(&format!(
                "{}",
                style(format!(
                    "{PREFIX} ✅ Archive created successfully: {}",
                    destination.display()
                ))
                .green()
            ));
            let _ = self.out.write_line(&format!(
                "{} {}",
                style(format!("{PREFIX} Total files:")).green(),
                style(summary.total_files).cyan()
            ));
            let _ = self.out.write_line(&format!(
                "{} {}",
                style(format!("{PREFIX} Archive size:")).green(),
                style(&size).cyan()
            ));
        } else {
            let _ = self.out.write_line(&format!(
                "{PREFIX} Archive created successfully: {}",
                destination.display()
            ));
            let _ = self
                .out
                .write_line(&format!("{PREFIX} Total files: {}", summary.total_files));
            let _ = self
                .out
                .write_line(&format!("{PREFIX} Archive size: {size}"));
        }

        if self.verbose {
            let _ = self.out.write_line(&format!(
                "{PREFIX} Uncompressed size: {} ({:.1}% saved)",
                format_bytes(summary.bytes_read),
                summary.compression_percentage()
            ));
            if summary.duplicates_skipped > 0 {
                let _ = self.out.write_line(&format!(
                    "{PREFIX} Duplicate entries kept once: {}",
                    summary.duplicates_skipped
                ));
            }
            let _ = self
                .out
                .write_line(&format!("{PREFIX} Duration: {:?}", summary.duration));
        }

        if summary.has_warnings() && self.verbose {
            if self.use_colors {
                let _ = self
                    .out
                    .write_line(&format!("{}", style("Warnings:").yellow().bold()));
            } else {
                let _ = self.out.write_line("Warnings:");
            }
            for warning in &summary.warnings {
                let _ = self.out.write_line(&format!("  - {warning}"));
            }
        }
    }

    /// Prints an error to stderr; verbose mode adds the cause chain when
    /// there is one.
    pub fn format_error(&self, error: &anyhow::Error) {
        if self.use_colors {
            let _ = self.err.write_line(&format!(
                "{}",
                style(format!("{PREFIX} ❌ {error:#}")).red()
            ));
        } else {
            let _ = self.err.write_line(&format!("{PREFIX} {error:#}"));
        }

        if self.verbose && error.chain().count() > 1 {
            let _ = self.err.write_line(&format!("{error:?}"));
        }
    }
}

/// Formats a byte count with binary prefixes.
///
/// Uses 1024 scaling, at most two decimals, and drops trailing zeros.
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];

    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let fixed = format!("{value:.2}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed} {}", UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes_zero() {
        assert_eq!(format_bytes(0), "0 Bytes");
    }

    #[test]
    fn test_format_bytes_small() {
        assert_eq!(format_bytes(1), "1 Bytes");
        assert_eq!(format_bytes(512), "512 Bytes");
        assert_eq!(format_bytes(1023), "1023 Bytes");
    }

    #[test]
    fn test_format_bytes_kilobytes() {
        assert_eq!(format_bytes(1024), "1 KB");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(1049), "1.02 KB");
    }

    #[test]
    fn test_format_bytes_megabytes() {
        assert_eq!(format_bytes(1_048_576), "1 MB");
        assert_eq!(format_bytes(1_234_567), "1.18 MB");
        assert_eq!(format_bytes(10 * 1024 * 1024 + 512 * 1024), "10.5 MB");
    }

    #[test]
    fn test_format_bytes_large_units() {
        assert_eq!(format_bytes(1024 * 1024 * 1024), "1 GB");
        assert_eq!(format_bytes(1024_u64.pow(4)), "1 TB");
        assert_eq!(format_bytes(1024_u64.pow(5)), "1024 TB");
    }

    #[test]
    fn test_format_bytes_keeps_integer_zeros() {
        assert_eq!(format_bytes(100 * 1024), "100 KB");
        assert_eq!(format_bytes(200), "200 Bytes");
    }
}
