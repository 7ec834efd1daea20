//! `shapeguard` command-line tool.
//!
//! Exit status: 0 when the command succeeds, 1 when a value or schema is
//! rejected (the errors are printed to stdout as JSON), 2 for usage, I/O and
//! configuration failures.

mod cli;
mod commands;
mod settings;

use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use std::process::ExitCode;

use crate::cli::Cli;
use crate::settings::Settings;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let settings = Settings::load(cli.config.as_deref())?;
    let _log = shapeguard_log::init_with(settings.log_config(cli.verbose)?)
        .context("failed to initialise logging")?;
    tracing::debug!(?settings, "settings loaded");

    let outcome = commands::run(cli.command, &settings)?;

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", settings.render(outcome.value())?).context("failed to write output")?;
    Ok(outcome.exit_code())
}
