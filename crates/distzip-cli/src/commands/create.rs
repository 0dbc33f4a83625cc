//! Archive creation from a pattern-list file.

use crate::cli::Cli;
use crate::error::convert_error;
use crate::output::HumanFormatter;
use crate::progress::CliProgress;
use anyhow::Context;
use anyhow::Result;
use distzip_core::ArchiveBuilder;
use distzip_core::PatternList;
use distzip_core::Summary;
use indicatif::ProgressBar;
use std::env;
use std::path::Path;
use std::path::PathBuf;

pub fn execute(cli: &Cli, formatter: &HumanFormatter, spinner: ProgressBar) -> Result<()> {
    let mut progress = CliProgress::new(spinner, "Creating zip archive...", formatter);

    match run(cli, formatter, &mut progress) {
        Ok(summary) => {
            progress.succeed();
            formatter.format_summary(&cli.destination, &summary);
            Ok(())
        }
        Err(err) => {
            progress.fail();
            Err(err)
        }
    }
}

fn run(cli: &Cli, formatter: &HumanFormatter, progress: &mut CliProgress<'_>) -> Result<Summary> {
    let cwd = working_dir(cli.cwd.as_deref())?;
    // Absolute config or destination paths replace the working directory.
    let config_path = cwd.join(&cli.config);
    let destination = cwd.join(&cli.destination);

    let patterns = PatternList::load(&config_path).map_err(convert_error)?;
    if formatter.is_verbose() {
        progress.info(&format!(
            "Found {} patterns in configuration file.",
            patterns.len()
        ));
    }

    ArchiveBuilder::new(&cwd)
        .with_options(cli.build_options())
        .build_with_progress(patterns.as_slice(), &destination, progress)
        .map_err(convert_error)
}

fn working_dir(cwd: Option<&Path>) -> Result<PathBuf> {
    let current = env::current_dir().context("failed to get current directory")?;
    Ok(cwd.map_or_else(|| current.clone(), |dir| current.join(dir)))
}
