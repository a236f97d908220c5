//! Unvalidated configuration as deserialized from a source file.
//!
//! Every field is optional here so that a missing value is reported as a
//! [`ConfigError::Invalid`] naming the field, instead of a parser error.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::expand::expand_in_place;
use crate::types::{
    DocsPreset, Footer, FooterLink, FooterSection, FooterStyle, LinkPolicy, LinkTarget, Logo,
    NavTarget, Navbar, NavbarItem, NavbarPosition, ThemeChoice,
};
use crate::{ConfigError, SiteDescriptor};

/// Locale used when the source does not list any.
const DEFAULT_LOCALE: &str = "en";

/// Operator settings that take precedence over the configuration source.
///
/// Applied before validation, so an override is held to the same rules as
/// the value it replaces.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    /// Override `baseUrl`.
    pub base_url: Option<String>,
    /// Override `url`.
    pub url: Option<String>,
    /// Override `onBrokenLinks`.
    pub on_broken_links: Option<LinkPolicy>,
}

/// Site configuration as written by the operator.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawSite {
    pub title: Option<String>,
    pub tagline: Option<String>,
    pub url: Option<String>,
    pub base_url: Option<String>,
    pub favicon: Option<String>,
    pub organization_name: Option<String>,
    pub project_name: Option<String>,
    pub locales: Option<Vec<String>>,
    /// Nested alternative to `locales`; the two cannot be combined.
    pub i18n: Option<RawI18n>,
    pub on_broken_links: Option<LinkPolicy>,
    pub on_broken_markdown_links: Option<LinkPolicy>,
    pub navbar: RawNavbar,
    pub footer: RawFooter,
    pub theme: RawTheme,
    pub docs: RawDocs,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawI18n {
    pub default_locale: Option<String>,
    pub locales: Option<Vec<String>>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawNavbar {
    pub title: Option<String>,
    pub logo: Option<RawLogo>,
    pub items: Vec<RawNavbarItem>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawLogo {
    pub alt: Option<String>,
    pub src: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawNavbarItem {
    /// `"doc"` or `"link"`; inferred from `docId`/`href` when absent.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub label: Option<String>,
    pub doc_id: Option<String>,
    pub href: Option<String>,
    pub position: Option<NavbarPosition>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawFooter {
    pub style: Option<FooterStyle>,
    #[serde(alias = "sections")]
    pub links: Vec<RawFooterSection>,
    pub copyright: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawFooterSection {
    pub title: Option<String>,
    pub items: Vec<RawFooterLink>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawFooterLink {
    pub label: Option<String>,
    pub to: Option<String>,
    pub href: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawTheme {
    pub light: Option<String>,
    pub dark: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawDocs {
    pub route_base_path: Option<String>,
    pub sidebar_path: Option<String>,
    pub custom_css: Option<String>,
    pub blog: Option<bool>,
}

impl RawSite {
    /// Apply operator overrides. Only `Some` values replace source values.
    pub fn apply_overrides(&mut self, overrides: &Overrides) {
        if let Some(base_url) = &overrides.base_url {
            self.base_url = Some(base_url.clone());
        }
        if let Some(url) = &overrides.url {
            self.url = Some(url.clone());
        }
        if let Some(policy) = overrides.on_broken_links {
            self.on_broken_links = Some(policy);
        }
    }

    /// Expand `${VAR}` references in URL-valued fields.
    pub(crate) fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        expand_in_place(&mut self.url, "url")?;
        expand_in_place(&mut self.base_url, "baseUrl")?;
        for item in &mut self.navbar.items {
            expand_in_place(&mut item.href, "navbar.item.href")?;
        }
        for link in self.footer.links.iter_mut().flat_map(|s| s.items.iter_mut()) {
            expand_in_place(&mut link.href, "footer.section.item.href")?;
        }
        Ok(())
    }

    /// Validate, apply defaults and produce the immutable descriptor.
    ///
    /// Relative paths are resolved against `base_dir`. Fields are checked in
    /// a fixed order so the reported error is deterministic.
    pub fn into_descriptor(self, base_dir: &Path) -> Result<SiteDescriptor, ConfigError> {
        let title = required(self.title, "title")?;
        let base_url = normalize_base_url(required(self.base_url, "baseUrl")?)?;
        let url = self.url.map(normalize_site_url).transpose()?;
        let locales = resolve_locales(self.locales, self.i18n)?;
        let navbar = self.navbar.resolve(&title)?;
        let footer = self.footer.resolve()?;
        let theme = self.theme.resolve()?;
        let docs = self.docs.resolve(base_dir)?;

        Ok(SiteDescriptor {
            title,
            tagline: self.tagline.unwrap_or_default(),
            url,
            base_url,
            favicon: self.favicon,
            organization_name: self.organization_name,
            project_name: self.project_name,
            locales,
            on_broken_links: self.on_broken_links.unwrap_or_default(),
            on_broken_markdown_links: self.on_broken_markdown_links.unwrap_or_default(),
            navbar,
            footer,
            theme,
            docs,
            config_path: None,
        })
    }
}

impl RawNavbar {
    fn resolve(self, site_title: &str) -> Result<Navbar, ConfigError> {
        let logo = self
            .logo
            .map(|logo| -> Result<Logo, ConfigError> {
                Ok(Logo {
                    src: required(logo.src, "navbar.logo.src")?,
                    alt: logo.alt.unwrap_or_else(|| site_title.to_owned()),
                })
            })
            .transpose()?;
        let items = self
            .items
            .into_iter()
            .map(RawNavbarItem::resolve)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Navbar {
            title: self.title,
            logo,
            items,
        })
    }
}

impl RawNavbarItem {
    fn resolve(self) -> Result<NavbarItem, ConfigError> {
        let label = required(self.label, "navbar.item.label")?;

        let target = match self.kind.as_deref() {
            Some("doc") => {
                forbid(self.href.as_ref(), "navbar.item.href", "not allowed on doc items")?;
                doc_link(required(self.doc_id, "navbar.item.docId")?)
            }
            Some("link") => {
                forbid(self.doc_id.as_ref(), "navbar.item.docId", "not allowed on link items")?;
                external_link(required(self.href, "navbar.item.href")?)?
            }
            Some(other) => {
                return Err(ConfigError::invalid(
                    "navbar.item.type",
                    format!("unknown item type '{other}' (expected doc or link)"),
                ));
            }
            None => match (self.doc_id, self.href) {
                (Some(doc_id), None) => doc_link(non_empty(doc_id, "navbar.item.docId")?),
                (None, Some(href)) => external_link(href)?,
                (Some(_), Some(_)) => {
                    return Err(ConfigError::invalid(
                        "navbar.item",
                        "expected exactly one of docId or href",
                    ));
                }
                (None, None) => {
                    return Err(ConfigError::invalid("navbar.item", "expected docId or href"));
                }
            },
        };

        Ok(NavbarItem {
            label,
            position: self.position.unwrap_or_default(),
            target,
        })
    }
}

fn doc_link(doc_id: String) -> NavTarget {
    NavTarget::DocLink { doc_id }
}

fn external_link(href: String) -> Result<NavTarget, ConfigError> {
    require_http_url(&href, "navbar.item.href")?;
    Ok(NavTarget::ExternalLink { href })
}

impl RawFooter {
    fn resolve(self) -> Result<Footer, ConfigError> {
        let sections = self
            .links
            .into_iter()
            .map(RawFooterSection::resolve)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Footer {
            style: self.style.unwrap_or_default(),
            sections,
            copyright: self.copyright.filter(|c| !c.trim().is_empty()),
        })
    }
}

impl RawFooterSection {
    fn resolve(self) -> Result<FooterSection, ConfigError> {
        let title = required(self.title, "footer.section.title")?;
        let items = self
            .items
            .into_iter()
            .map(RawFooterLink::resolve)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(FooterSection { title, items })
    }
}

impl RawFooterLink {
    fn resolve(self) -> Result<FooterLink, ConfigError> {
        let label = required(self.label, "footer.section.item.label")?;
        let target = match (self.to, self.href) {
            (Some(to), None) => {
                require_route(&to, "footer.section.item.to")?;
                LinkTarget::To(to)
            }
            (None, Some(href)) => {
                require_http_url(&href, "footer.section.item.href")?;
                LinkTarget::Href(href)
            }
            (Some(_), Some(_)) => {
                return Err(ConfigError::invalid(
                    "footer.section.item",
                    "expected exactly one of to or href",
                ));
            }
            (None, None) => {
                return Err(ConfigError::invalid(
                    "footer.section.item",
                    "expected to or href",
                ));
            }
        };
        Ok(FooterLink { label, target })
    }
}

impl RawTheme {
    fn resolve(self) -> Result<ThemeChoice, ConfigError> {
        let defaults = ThemeChoice::default();
        Ok(ThemeChoice {
            light: or_default(self.light, defaults.light, "theme.light")?,
            dark: or_default(self.dark, defaults.dark, "theme.dark")?,
        })
    }
}

impl RawDocs {
    fn resolve(self, base_dir: &Path) -> Result<DocsPreset, ConfigError> {
        let defaults = DocsPreset::default();
        let route_base_path =
            or_default(self.route_base_path, defaults.route_base_path, "docs.routeBasePath")?;
        require_route(&route_base_path, "docs.routeBasePath")?;

        let resolve = |path: Option<String>, field: &str| {
            path.map(|p| non_empty(p, field).map(|p| base_dir.join(p)))
                .transpose()
        };

        Ok(DocsPreset {
            route_base_path,
            sidebar_path: resolve(self.sidebar_path, "docs.sidebarPath")?,
            custom_css: resolve(self.custom_css, "docs.customCss")?,
            blog: self.blog.unwrap_or(defaults.blog),
        })
    }
}

/// Require a field to be present and not blank.
fn required(value: Option<String>, field: &str) -> Result<String, ConfigError> {
    match value {
        Some(value) => non_empty(value, field),
        None => Err(ConfigError::invalid(field, "required")),
    }
}

/// Require a present value to be not blank.
fn non_empty(value: String, field: &str) -> Result<String, ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::invalid(field, "must be non-empty"));
    }
    Ok(value)
}

fn or_default(value: Option<String>, default: String, field: &str) -> Result<String, ConfigError> {
    value.map_or(Ok(default), |v| non_empty(v, field))
}

/// Reject a value that must not be combined with the chosen variant.
fn forbid(value: Option<&String>, field: &str, reason: &str) -> Result<(), ConfigError> {
    match value {
        Some(_) => Err(ConfigError::invalid(field, reason)),
        None => Ok(()),
    }
}

/// Require an http:// or https:// URL.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::invalid(
            field,
            "must start with http:// or https://",
        ));
    }
    Ok(())
}

/// Require a site-relative route.
fn require_route(route: &str, field: &str) -> Result<(), ConfigError> {
    if !route.starts_with('/') {
        return Err(ConfigError::invalid(field, "must start with /"));
    }
    Ok(())
}

/// `baseUrl` always starts and ends with `/`.
fn normalize_base_url(mut base_url: String) -> Result<String, ConfigError> {
    require_route(&base_url, "baseUrl")?;
    if !base_url.ends_with('/') {
        base_url.push('/');
    }
    Ok(base_url)
}

/// `url` is an absolute origin without a trailing `/`.
fn normalize_site_url(url: String) -> Result<String, ConfigError> {
    let url = non_empty(url, "url")?;
    require_http_url(&url, "url")?;
    Ok(url.trim_end_matches('/').to_owned())
}

fn resolve_locales(
    locales: Option<Vec<String>>,
    i18n: Option<RawI18n>,
) -> Result<Vec<String>, ConfigError> {
    match (locales, i18n) {
        (Some(_), Some(_)) => Err(ConfigError::invalid(
            "i18n",
            "cannot be combined with top-level locales",
        )),
        (Some(locales), None) => {
            check_locale_codes(&locales, "locales")?;
            Ok(locales)
        }
        (None, Some(i18n)) => i18n.resolve(),
        (None, None) => Ok(vec![DEFAULT_LOCALE.to_owned()]),
    }
}

impl RawI18n {
    /// Locales with `defaultLocale` moved to the front.
    fn resolve(self) -> Result<Vec<String>, ConfigError> {
        let mut locales = match (self.locales, &self.default_locale) {
            (Some(locales), _) => locales,
            (None, Some(default)) => vec![default.clone()],
            (None, None) => vec![DEFAULT_LOCALE.to_owned()],
        };
        check_locale_codes(&locales, "i18n.locales")?;

        if let Some(default) = self.default_locale {
            let Some(index) = locales.iter().position(|code| *code == default) else {
                return Err(ConfigError::invalid(
                    "i18n.defaultLocale",
                    format!("'{default}' is not listed in i18n.locales"),
                ));
            };
            let default = locales.remove(index);
            locales.insert(0, default);
        }
        Ok(locales)
    }
}

/// Locale lists are non-empty, without blank or repeated codes.
fn check_locale_codes(locales: &[String], field: &str) -> Result<(), ConfigError> {
    if locales.is_empty() {
        return Err(ConfigError::invalid(field, "must be non-empty"));
    }

    let mut seen = HashSet::with_capacity(locales.len());
    for code in locales {
        if code.trim().is_empty() {
            return Err(ConfigError::invalid(
                field,
                "locale codes must be non-empty",
            ));
        }
        if !seen.insert(code.as_str()) {
            return Err(ConfigError::invalid(
                field,
                format!("duplicate locale '{code}'"),
            ));
        }
    }
    Ok(())
}
