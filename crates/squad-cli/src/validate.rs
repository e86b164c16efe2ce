//! # Validate Subcommand
//!
//! Loads a roster file and reports the outcome.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Args, ValueEnum};
use squad_roster::{load_roster, InvalidRoster, Roster};

/// Output format for a valid roster.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One-line summary.
    #[default]
    Text,
    /// The validated roster as JSON.
    Json,
}

/// Arguments for the validate subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Roster YAML file.
    pub path: PathBuf,

    /// How to print a valid roster.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Load and validate the roster at `path`.
pub fn load_file(path: &Path) -> anyhow::Result<Roster> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    match load_roster(&text) {
        Ok(Some(roster)) => Ok(roster),
        Ok(None) => bail!("{} contains no roster document", path.display()),
        Err(err) => {
            if let Some(invalid) = err.as_validation().and_then(InvalidRoster::find) {
                tracing::warn!(missing = ?invalid.missing(), "roster leaves positions unfilled");
            }
            Err(err).with_context(|| format!("invalid roster file {}", path.display()))
        }
    }
}

/// Render a valid roster for output.
pub fn render(roster: &Roster, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => Ok(format!(
            "{}: valid roster with {} players",
            roster.name(),
            roster.players().len()
        )),
        OutputFormat::Json => {
            serde_json::to_string_pretty(roster).context("cannot serialize roster")
        }
    }
}

/// Handle `squad validate`.
pub fn run(args: &ValidateArgs) -> anyhow::Result<String> {
    tracing::info!(path = %args.path.display(), "validating roster");
    let roster = load_file(&args.path)?;
    tracing::info!(name = roster.name(), players = roster.players().len(), "roster is valid");
    render(&roster, args.format)
}
