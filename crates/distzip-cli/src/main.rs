//! distzip CLI - packages files listed in a pattern file into a zip archive.

mod cli;
mod commands;
mod error;
mod output;
mod progress;

use clap::Parser;
use console::Term;
use indicatif::ProgressBar;
use progress::SpinnerWriter;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    let spinner = progress::spinner();
    init_tracing(cli.verbose, &spinner);

    let formatter = output::HumanFormatter::new(cli.verbose);

    match commands::create::execute(&cli, &formatter, spinner) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            formatter.format_error(&err);
            ExitCode::FAILURE
        }
    }
}

// Events share stderr with the spinner, so they are written through it.
fn init_tracing(verbose: bool, spinner: &ProgressBar) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    let _ = tracing_subscriber::fmt()
        .with_writer(SpinnerWriter::new(spinner.clone()))
        .with_ansi(Term::stderr().is_term())
        .with_max_level(level)
        .with_target(false)
        .without_time()
        .try_init();
}
