//! Folio CLI - site descriptor checker.
//!
//! Provides commands for:
//! - `check`: Load and validate the site configuration
//! - `show`: Print the validated descriptor as JSON for the renderer
//! - `init`: Write a starter `folio.toml`

mod commands;
mod error;
mod output;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, InitArgs, ShowArgs};
use output::Output;

/// Folio - book site configuration.
#[derive(Parser)]
#[command(name = "folio", version, about)]
struct Cli {
    /// Enable verbose output (debug logs from configuration loading).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the site configuration.
    Check(CheckArgs),
    /// Print the validated site descriptor as JSON.
    Show(ShowArgs),
    /// Create a starter configuration file.
    Init(InitArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables DEBUG level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Check(args) => args.execute(),
        Commands::Show(args) => args.execute(),
        Commands::Init(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_check_with_overrides() {
        let cli = Cli::try_parse_from([
            "folio",
            "check",
            "--config",
            "site/folio.toml",
            "--base-url",
            "/preview/",
            "--on-broken-links",
            "fail-build",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Check(_)));
        assert!(!cli.verbose);
    }

    #[test]
    fn test_parse_rejects_unknown_link_policy() {
        let result = Cli::try_parse_from(["folio", "check", "--on-broken-links", "loud"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_global_verbose() {
        let cli = Cli::try_parse_from(["folio", "show", "--compact", "-v"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Show(_)));
    }

    #[test]
    fn test_parse_init_defaults() {
        let cli = Cli::try_parse_from(["folio", "init"]).unwrap();
        assert!(matches!(cli.command, Commands::Init(_)));
    }
}
