//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod init;
pub(crate) mod show;

use std::path::PathBuf;

use clap::Args;
use folio_config::{LinkPolicy, Overrides, SiteDescriptor};

use crate::error::CliError;

pub(crate) use check::CheckArgs;
pub(crate) use init::InitArgs;
pub(crate) use show::ShowArgs;

/// Where to load the site descriptor from, and what to override.
#[derive(Args, Debug)]
pub(crate) struct SourceArgs {
    /// Path to configuration file (default: auto-discover folio.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Base URL the site is served under (overrides config).
    #[arg(long, env = "FOLIO_BASE_URL")]
    base_url: Option<String>,

    /// Absolute site URL (overrides config).
    #[arg(long)]
    url: Option<String>,

    /// Broken link policy: fail-build, warn or ignore (overrides config).
    #[arg(long)]
    on_broken_links: Option<LinkPolicy>,
}

impl SourceArgs {
    /// Load and validate the site descriptor.
    pub(crate) fn load(self) -> Result<SiteDescriptor, CliError> {
        let overrides = Overrides {
            base_url: self.base_url,
            url: self.url,
            on_broken_links: self.on_broken_links,
        };
        let site = SiteDescriptor::load(self.config.as_deref(), Some(&overrides))?;
        Ok(site)
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use pretty_assertions::assert_eq;

    use super::*;

    #[derive(Parser)]
    struct Source {
        #[command(flatten)]
        source: SourceArgs,
    }

    #[test]
    fn test_base_url_from_env() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("folio.toml");
        std::fs::write(&path, "title = \"Book\"\nbaseUrl = \"/\"\n").unwrap();
        let config = path.to_str().unwrap();

        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("FOLIO_BASE_URL", "/preview");
        }
        let from_env = Source::try_parse_from(["folio", "--config", config]).unwrap();
        let from_flag =
            Source::try_parse_from(["folio", "--config", config, "--base-url", "/flag/"]).unwrap();
        unsafe {
            std::env::remove_var("FOLIO_BASE_URL");
        }

        assert_eq!(from_env.source.base_url.as_deref(), Some("/preview"));
        assert_eq!(from_env.source.load().unwrap().base_url(), "/preview/");
        assert_eq!(from_flag.source.load().unwrap().base_url(), "/flag/");
    }
}
