//! # squad CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use clap::Parser;

/// Squad roster toolchain.
///
/// Validates roster documents against the Player and Roster schemas.
#[derive(Parser, Debug)]
#[command(name = "squad", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Validate a roster file.
    Validate(squad_cli::validate::ValidateArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate(args) => {
            let report = squad_cli::validate::run(&args)?;
            println!("{report}");
        }
    }

    Ok(())
}
