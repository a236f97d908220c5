//! Site descriptor loading for Folio.
//!
//! Parses `folio.toml` (or `folio.json`) into a validated, immutable
//! [`SiteDescriptor`] that is handed by reference to the site renderer.
//! Config files are auto-discovered in the current directory and its parents.
//!
//! Operator overrides can be applied during load via [`Overrides`].
//!
//! ## Environment Variable Expansion
//!
//! URL-valued fields support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `url`
//! - `baseUrl`
//! - `navbar.items[].href`
//! - `footer.links[].items[].href`
//!
//! ## Example
//!
//! ```toml
//! title = "Physical AI & Humanoid Robotics"
//! url = "https://${SITE_DOMAIN:-book.example.com}"
//! baseUrl = "/"
//! locales = ["en"]
//! onBrokenLinks = "ignore"
//!
//! [[navbar.items]]
//! type = "doc"
//! docId = "intro"
//! label = "Book"
//!
//! [theme]
//! light = "github"
//! dark = "dracula"
//! ```

mod expand;
mod raw;
mod types;

use std::path::{Path, PathBuf};

use serde::Serialize;

pub use raw::{
    Overrides, RawDocs, RawFooter, RawFooterLink, RawFooterSection, RawI18n, RawLogo,
    RawNavbar, RawNavbarItem, RawSite, RawTheme,
};
pub use types::{
    DocsPreset, Footer, FooterLink, FooterSection, FooterStyle, LinkPolicy, LinkTarget, Logo,
    NavTarget, Navbar, NavbarItem, NavbarPosition, ThemeChoice,
};

/// Configuration filename written by `folio init` and searched first.
pub const CONFIG_FILENAME: &str = "folio.toml";

/// Filenames searched during discovery, in order of preference.
const CONFIG_FILENAMES: [&str; 2] = [CONFIG_FILENAME, "folio.json"];

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    /// A field is missing or has an invalid value.
    #[error("Invalid configuration: {field}: {reason}")]
    Invalid {
        /// Dotted key path (e.g., "`navbar.item.label`").
        field: String,
        /// What is wrong with it (e.g., "required").
        reason: String,
    },
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`baseUrl`").
        field: String,
        /// Error message (e.g., "${`SITE_PREFIX`} not set").
        message: String,
    },
}

impl ConfigError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.to_owned(),
            reason: reason.into(),
        }
    }

    /// The offending field, for errors that concern one.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Invalid { field, .. } | Self::EnvVar { field, .. } => Some(field),
            _ => None,
        }
    }
}

/// Validated site configuration.
///
/// Only obtainable through [`RawSite::into_descriptor`] or the loaders below,
/// so every instance satisfies the configuration invariants. Fields are read
/// through accessors and never change after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteDescriptor {
    title: String,
    tagline: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    base_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    favicon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    organization_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    project_name: Option<String>,
    locales: Vec<String>,
    on_broken_links: LinkPolicy,
    on_broken_markdown_links: LinkPolicy,
    navbar: Navbar,
    footer: Footer,
    theme: ThemeChoice,
    docs: DocsPreset,
    #[serde(skip)]
    config_path: Option<PathBuf>,
}

/// Source format, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SourceFormat {
    Toml,
    Json,
}

impl SourceFormat {
    fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Toml,
        }
    }

    fn parse(self, content: &str) -> Result<RawSite, ConfigError> {
        match self {
            Self::Toml => parse_toml(content),
            Self::Json => parse_json(content),
        }
    }
}

impl SiteDescriptor {
    /// Load the site descriptor with optional operator overrides.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `folio.toml` or `folio.json` in the current
    /// directory and its parents.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if the explicit path does not exist or
    /// discovery finds nothing, and any parse or validation error otherwise.
    pub fn load(
        config_path: Option<&Path>,
        overrides: Option<&Overrides>,
    ) -> Result<Self, ConfigError> {
        let path = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            path.to_path_buf()
        } else {
            let cwd = std::env::current_dir()?;
            discover(&cwd).ok_or_else(|| ConfigError::NotFound(cwd.join(CONFIG_FILENAME)))?
        };

        Self::load_from_file(&path, overrides)
    }

    /// Load the site descriptor from a specific file.
    ///
    /// Relative paths in the file resolve against its directory.
    pub fn load_from_file(path: &Path, overrides: Option<&Overrides>) -> Result<Self, ConfigError> {
        tracing::debug!(path = %path.display(), "Loading site configuration");
        let content = std::fs::read_to_string(path)?;
        let raw = SourceFormat::from_path(path).parse(&content)?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        let mut site = Self::build(raw, config_dir, overrides)?;
        site.config_path = Some(path.to_path_buf());

        tracing::debug!(
            title = %site.title,
            locales = site.locales.len(),
            navbar_items = site.navbar.items.len(),
            "Site configuration loaded"
        );
        Ok(site)
    }

    /// Build a descriptor from TOML source held in memory.
    pub fn from_toml_str(content: &str, base_dir: &Path) -> Result<Self, ConfigError> {
        Self::build(parse_toml(content)?, base_dir, None)
    }

    /// Build a descriptor from JSON source held in memory.
    pub fn from_json_str(content: &str, base_dir: &Path) -> Result<Self, ConfigError> {
        Self::build(parse_json(content)?, base_dir, None)
    }

    /// Expand variables, apply overrides, then validate.
    fn build(
        mut raw: RawSite,
        base_dir: &Path,
        overrides: Option<&Overrides>,
    ) -> Result<Self, ConfigError> {
        raw.expand_env_vars()?;
        if let Some(overrides) = overrides {
            raw.apply_overrides(overrides);
        }
        raw.into_descriptor(base_dir)
    }

    /// Site title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Site tagline, empty when not configured.
    #[must_use]
    pub fn tagline(&self) -> &str {
        &self.tagline
    }

    /// Absolute site origin without a trailing slash.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// URL prefix the site is served under; starts and ends with `/`.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn favicon(&self) -> Option<&str> {
        self.favicon.as_deref()
    }

    #[must_use]
    pub fn organization_name(&self) -> Option<&str> {
        self.organization_name.as_deref()
    }

    #[must_use]
    pub fn project_name(&self) -> Option<&str> {
        self.project_name.as_deref()
    }

    /// Configured locales; never empty.
    #[must_use]
    pub fn locales(&self) -> &[String] {
        &self.locales
    }

    /// The first configured locale.
    #[must_use]
    pub fn default_locale(&self) -> &str {
        &self.locales[0]
    }

    #[must_use]
    pub fn on_broken_links(&self) -> LinkPolicy {
        self.on_broken_links
    }

    #[must_use]
    pub fn on_broken_markdown_links(&self) -> LinkPolicy {
        self.on_broken_markdown_links
    }

    #[must_use]
    pub fn navbar(&self) -> &Navbar {
        &self.navbar
    }

    #[must_use]
    pub fn footer(&self) -> &Footer {
        &self.footer
    }

    #[must_use]
    pub fn theme(&self) -> &ThemeChoice {
        &self.theme
    }

    #[must_use]
    pub fn docs(&self) -> &DocsPreset {
        &self.docs
    }

    /// File the descriptor was loaded from, if any.
    #[must_use]
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Absolute URL of a site route, when `url` is configured.
    ///
    /// `route` is relative to `baseUrl`; a leading `/` is ignored.
    #[must_use]
    pub fn absolute_url(&self, route: &str) -> Option<String> {
        let origin = self.url.as_deref()?;
        Some(format!(
            "{origin}{}{}",
            self.base_url,
            route.trim_start_matches('/')
        ))
    }
}

/// Search for a config file in `start` and its parents.
#[must_use]
pub fn discover(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        for name in CONFIG_FILENAMES {
            let candidate = current.join(name);
            if candidate.is_file() {
                tracing::debug!(path = %candidate.display(), "Discovered site configuration");
                return Some(candidate);
            }
        }
        if !current.pop() {
            return None;
        }
    }
}

fn parse_toml(content: &str) -> Result<RawSite, ConfigError> {
    let table: toml::Table = toml::from_str(content)?;
    deserialize_site(toml::Value::Table(table)).map_err(|err| match field_path(&err) {
        Some(field) => ConfigError::invalid(&field, err.inner().message()),
        None => ConfigError::Toml(err.into_inner()),
    })
}

fn parse_json(content: &str) -> Result<RawSite, ConfigError> {
    let mut deserializer = serde_json::Deserializer::from_str(content);
    let raw = deserialize_site(&mut deserializer).map_err(|err| match field_path(&err) {
        Some(field) if err.inner().is_data() => {
            ConfigError::invalid(&field, err.inner().to_string())
        }
        _ => ConfigError::Json(err.into_inner()),
    })?;
    deserializer.end()?;
    Ok(raw)
}

/// Deserialize a raw site, tracking the key path of any type error and
/// logging keys that no field consumes.
fn deserialize_site<'de, D>(
    deserializer: D,
) -> Result<RawSite, serde_path_to_error::Error<D::Error>>
where
    D: serde::Deserializer<'de>,
{
    let mut report_unknown = |path: serde_ignored::Path<'_>| {
        tracing::warn!(key = %path, "Ignoring unknown configuration key");
    };
    serde_path_to_error::deserialize(serde_ignored::Deserializer::new(
        deserializer,
        &mut report_unknown,
    ))
}

/// Dotted key path of a deserialization error, `None` at the document root.
fn field_path<E>(err: &serde_path_to_error::Error<E>) -> Option<String> {
    let path = err.path();
    path.iter().next().is_some().then(|| path.to_string())
}
