//! `folio check` command implementation.

use clap::Args;
use folio_config::{LinkPolicy, NavbarPosition, SiteDescriptor};

use super::SourceArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    source: SourceArgs,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or is invalid.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let site = self.source.load()?;

        if let Some(path) = site.config_path() {
            output.field("Config", &path.display().to_string());
        }
        for (label, value) in summary(&site) {
            output.field(label, &value);
        }

        if site.on_broken_links() == LinkPolicy::Ignore {
            output.warning("broken links will not be reported (onBrokenLinks = \"ignore\")");
        }

        output.success("Configuration is valid");
        Ok(())
    }
}

/// Labelled descriptor aspects worth confirming at a glance.
fn summary(site: &SiteDescriptor) -> Vec<(&'static str, String)> {
    let navbar = site.navbar();
    let mut fields = vec![("Title", site.title().to_owned())];
    if let Some(url) = site.url() {
        fields.push(("URL", url.to_owned()));
    }
    fields.extend([
        ("Base URL", site.base_url().to_owned()),
        (
            "Locales",
            format!(
                "{} (default: {})",
                site.locales().join(", "),
                site.default_locale()
            ),
        ),
        (
            "Broken links",
            format!(
                "{} (markdown: {})",
                site.on_broken_links(),
                site.on_broken_markdown_links()
            ),
        ),
        (
            "Navbar",
            format!(
                "{} left, {} right",
                navbar.items_at(NavbarPosition::Left).count(),
                navbar.items_at(NavbarPosition::Right).count()
            ),
        ),
        ("Footer sections", site.footer().sections.len().to_string()),
        (
            "Theme",
            format!("{} / {}", site.theme().light, site.theme().dark),
        ),
    ]);
    fields
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_summary() {
        let toml = r#"
title = "Book"
url = "https://book.example.com"
baseUrl = "/"
locales = ["en", "ur"]

[[navbar.items]]
docId = "intro"
label = "Book"

[[navbar.items]]
href = "https://github.com/example/book"
label = "GitHub"
position = "right"
"#;
        let site = SiteDescriptor::from_toml_str(toml, Path::new("/site")).unwrap();
        assert_eq!(
            summary(&site),
            vec![
                ("Title", "Book".to_owned()),
                ("URL", "https://book.example.com".to_owned()),
                ("Base URL", "/".to_owned()),
                ("Locales", "en, ur (default: en)".to_owned()),
                ("Broken links", "warn (markdown: warn)".to_owned()),
                ("Navbar", "1 left, 1 right".to_owned()),
                ("Footer sections", "0".to_owned()),
                ("Theme", "github / dracula".to_owned()),
            ]
        );
    }

    #[test]
    fn test_summary_without_url() {
        let site =
            SiteDescriptor::from_toml_str("title = \"Book\"\nbaseUrl = \"/\"\n", Path::new("/"))
                .unwrap();
        let labels: Vec<_> = summary(&site).into_iter().map(|(label, _)| label).collect();
        assert_eq!(labels[..2], ["Title", "Base URL"]);
    }
}
