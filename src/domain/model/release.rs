use anyhow::bail;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// File extension of a packaged plugin artifact.
pub const PACKAGED_EXTENSION: &str = ".jar";

/// A downloadable file attached to a release.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Asset {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub download_url: String,
}

impl Asset {
    /// Whether this asset is a plugin jar rather than a checksum, archive or note.
    pub fn is_packaged(&self) -> bool {
        self.name.ends_with(PACKAGED_EXTENSION)
    }
}

/// A published release of a plugin.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Release {
    pub id: u64,
    /// Version tag (e.g., "v1.0.0")
    pub tag: String,
    /// Release name/title
    #[serde(default)]
    pub name: Option<String>,
    /// Publication date (ISO 8601)
    #[serde(default)]
    pub published_at: Option<String>,
    /// Whether this is a pre-release
    #[serde(default)]
    pub prerelease: bool,
    /// Release page on the hosting site
    #[serde(default)]
    pub html_url: String,
    /// URL to download the source archive
    #[serde(default)]
    pub zipball_url: String,
    #[serde(default)]
    pub assets: Vec<Asset>,
}

impl Release {
    /// Display title: the release name, or the tag when the name is missing or blank.
    pub fn title(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.tag,
        }
    }

    pub fn packaged_assets(&self) -> impl Iterator<Item = &Asset> {
        self.assets.iter().filter(|a| a.is_packaged())
    }
}

/// Version filter applied to the fetched release list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    #[default]
    Stable,
    Preview,
    All,
}

impl Channel {
    pub fn matches(self, release: &Release) -> bool {
        match self {
            Channel::Stable => !release.prerelease,
            Channel::Preview => release.prerelease,
            Channel::All => true,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Channel::Stable => "Stable releases are fully tested and suited for production servers.",
            Channel::Preview => "Preview releases carry the newest features but may be unstable.",
            Channel::All => "Every available release, stable and preview.",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Stable => write!(f, "stable"),
            Channel::Preview => write!(f, "preview"),
            Channel::All => write!(f, "all"),
        }
    }
}

impl FromStr for Channel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "stable" => Ok(Channel::Stable),
            "preview" => Ok(Channel::Preview),
            "all" => Ok(Channel::All),
            _ => bail!("Unknown channel: {}. Expected stable, preview, or all.", s),
        }
    }
}
