//! Validated descriptor components.
//!
//! Values of these types are only produced by
//! [`RawSite::into_descriptor`](crate::RawSite::into_descriptor) and are read
//! through a shared [`SiteDescriptor`](crate::SiteDescriptor) reference.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// What the renderer does when it finds a broken link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LinkPolicy {
    /// Abort the build.
    #[serde(alias = "throw")]
    FailBuild,
    /// Report and continue.
    #[default]
    Warn,
    /// Say nothing.
    Ignore,
}

impl LinkPolicy {
    /// Wire name of the policy.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FailBuild => "fail-build",
            Self::Warn => "warn",
            Self::Ignore => "ignore",
        }
    }
}

impl fmt::Display for LinkPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LinkPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fail-build" | "throw" => Ok(Self::FailBuild),
            "warn" => Ok(Self::Warn),
            "ignore" => Ok(Self::Ignore),
            other => Err(format!(
                "unknown link policy '{other}' (expected fail-build, warn or ignore)"
            )),
        }
    }
}

/// Side of the navbar an item is placed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavbarPosition {
    #[default]
    Left,
    Right,
}

/// Where a navbar item points.
///
/// Serialized with the same `type`/`docId`/`href` keys the source uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum NavTarget {
    /// A document id, resolved by the renderer against its document tree.
    #[serde(rename = "doc")]
    DocLink {
        #[serde(rename = "docId")]
        doc_id: String,
    },
    /// An absolute external URL.
    #[serde(rename = "link")]
    ExternalLink { href: String },
}

/// A single navbar entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavbarItem {
    pub label: String,
    pub position: NavbarPosition,
    #[serde(flatten)]
    pub target: NavTarget,
}

/// Navbar logo image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Logo {
    /// Alternative text, defaults to the site title.
    pub alt: String,
    /// Image path relative to the static assets directory.
    pub src: String,
}

/// Top navigation bar.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Navbar {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<Logo>,
    pub items: Vec<NavbarItem>,
}

impl Navbar {
    /// Items placed on the given side, in declaration order.
    pub fn items_at(&self, position: NavbarPosition) -> impl Iterator<Item = &NavbarItem> {
        self.items.iter().filter(move |item| item.position == position)
    }
}

/// Footer color scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FooterStyle {
    #[default]
    Light,
    Dark,
}

/// Where a footer link points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LinkTarget {
    /// Route inside the site, starting with `/`.
    To(String),
    /// Absolute external URL.
    Href(String),
}

/// A labelled footer link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FooterLink {
    pub label: String,
    #[serde(flatten)]
    pub target: LinkTarget,
}

/// A titled column of footer links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FooterSection {
    pub title: String,
    pub items: Vec<FooterLink>,
}

/// Page footer.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Footer {
    pub style: FooterStyle,
    #[serde(rename = "links")]
    pub sections: Vec<FooterSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
}

/// Syntax-highlighting theme ids from the renderer's theme registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeChoice {
    pub light: String,
    pub dark: String,
}

impl Default for ThemeChoice {
    fn default() -> Self {
        Self {
            light: "github".to_owned(),
            dark: "dracula".to_owned(),
        }
    }
}

/// Docs preset settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocsPreset {
    /// URL prefix under which docs are served.
    pub route_base_path: String,
    /// Sidebar definition file, absolute.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sidebar_path: Option<PathBuf>,
    /// Extra stylesheet, absolute.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_css: Option<PathBuf>,
    /// Whether the blog section is generated.
    pub blog: bool,
}

impl Default for DocsPreset {
    fn default() -> Self {
        Self {
            route_base_path: "/docs".to_owned(),
            sidebar_path: None,
            custom_css: None,
            blog: false,
        }
    }
}
