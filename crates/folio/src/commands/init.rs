//! `folio init` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use folio_config::{CONFIG_FILENAME, SiteDescriptor};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the init command.
#[derive(Args)]
pub(crate) struct InitArgs {
    /// Directory to create the configuration in (default: current directory).
    dir: Option<PathBuf>,

    /// Site title.
    #[arg(long, default_value = "My Book")]
    title: String,

    /// Overwrite an existing configuration file.
    #[arg(long)]
    force: bool,
}

impl InitArgs {
    /// Write a starter `folio.toml` and check that it loads.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let dir = self.dir.unwrap_or_else(|| PathBuf::from("."));

        let path = write_starter(&dir, &self.title, self.force)?;
        let site = SiteDescriptor::load_from_file(&path, None)?;

        output.success(&format!("Created {}", path.display()));
        output.field("Site", &format!("{} ({})", site.title(), site.base_url()));
        Ok(())
    }
}

/// Write the starter configuration into `dir`, returning its path.
fn write_starter(dir: &Path, title: &str, force: bool) -> Result<PathBuf, CliError> {
    let path = dir.join(CONFIG_FILENAME);
    if path.exists() && !force {
        return Err(CliError::Validation(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    std::fs::create_dir_all(dir)?;
    std::fs::write(&path, starter_config(title))?;
    tracing::debug!(path = %path.display(), "Wrote starter configuration");
    Ok(path)
}

/// Starter configuration for a single-locale book.
fn starter_config(title: &str) -> String {
    let title = toml::Value::String(title.to_owned());
    format!(
        r#"title = {title}
tagline = ""
baseUrl = "/"
locales = ["en"]
onBrokenLinks = "warn"
onBrokenMarkdownLinks = "warn"

[docs]
routeBasePath = "/"
sidebarPath = "sidebars.ts"

[navbar]
title = {title}

[[navbar.items]]
type = "doc"
docId = "intro"
label = "Book"
position = "left"

[footer]
style = "dark"

[[footer.links]]
title = "Documentation"
items = [{{ label = "Introduction", to = "/intro" }}]

[theme]
light = "github"
dark = "dracula"
"#
    )
}
