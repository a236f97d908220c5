//! `folio show` command implementation.

use clap::Args;

use super::SourceArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the show command.
#[derive(Args)]
pub(crate) struct ShowArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Emit compact single-line JSON.
    #[arg(long)]
    compact: bool,
}

impl ShowArgs {
    /// Print the validated descriptor as JSON on stdout.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let site = self.source.load()?;

        let json = if self.compact {
            serde_json::to_string(&site)?
        } else {
            serde_json::to_string_pretty(&site)?
        };
        output.data(&json)?;
        Ok(())
    }
}
