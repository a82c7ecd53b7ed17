//! Plugin catalog: which plugins the browser offers and where they live.

use anyhow::{Context, Result, bail};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::runtime::Runtime;
use crate::source::RepoId;

/// File name looked up under `<config_dir>/ardl/` when no catalog is given.
pub const CATALOG_FILE: &str = "catalog.json";

/// One selectable plugin.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PluginEntry {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Repository in `owner/repo` form
    pub repo: RepoId,
}

fn default_enabled() -> bool {
    true
}

/// The ordered list of plugins shown by the selector.
///
/// Deserialization goes through [`Catalog::new`], so a catalog always holds at
/// least one enabled plugin.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "RawCatalog")]
pub struct Catalog {
    plugins: Vec<PluginEntry>,
}

#[derive(Deserialize)]
struct RawCatalog {
    plugins: Vec<PluginEntry>,
}

impl TryFrom<RawCatalog> for Catalog {
    type Error = anyhow::Error;

    fn try_from(raw: RawCatalog) -> Result<Self> {
        Self::new(raw.plugins)
    }
}

impl Catalog {
    /// Builds a catalog, rejecting empty lists, duplicate ids and lists with
    /// nothing selectable.
    pub fn new(plugins: Vec<PluginEntry>) -> Result<Self> {
        if plugins.is_empty() {
            bail!("Plugin catalog is empty.");
        }

        let mut seen = HashSet::new();
        for plugin in &plugins {
            if !seen.insert(plugin.id.as_str()) {
                bail!("Duplicate plugin id in catalog: {}", plugin.id);
            }
        }

        if !plugins.iter().any(|p| p.enabled) {
            bail!("Plugin catalog has no enabled plugin.");
        }

        Ok(Self { plugins })
    }

    /// The ArTeam plugin line-up: ArLibs is available, ArMenu and ArChat are
    /// announced but not released yet.
    pub fn builtin() -> Self {
        let entry = |id: &str, name: &str, description: &str, enabled: bool| PluginEntry {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            enabled,
            repo: RepoId {
                owner: "ArTeamTech".to_string(),
                repo: name.to_string(),
            },
        };

        Self {
            plugins: vec![
                entry("arlibs", "ArLibs", "Core utility library", true),
                entry("armenu", "ArMenu", "Multi-purpose menu plugin", false),
                entry("archat", "ArChat", "Advanced chat plugin", false),
            ],
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse plugin catalog")
    }

    /// Loads the catalog from `explicit`, else from the user config directory
    /// when a catalog file exists there, else falls back to [`Catalog::builtin`].
    #[tracing::instrument(skip(runtime))]
    pub fn load<R: Runtime>(runtime: &R, explicit: Option<&Path>) -> Result<Self> {
        let path: Option<PathBuf> = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => runtime
                .config_dir()
                .map(|dir| dir.join("ardl").join(CATALOG_FILE))
                .filter(|path| runtime.exists(path)),
        };

        match path {
            Some(path) => {
                debug!("Loading plugin catalog from {:?}", path);
                let json = runtime.read_to_string(&path)?;
                Self::from_json(&json)
                    .with_context(|| format!("Invalid plugin catalog {}", path.display()))
            }
            None => {
                debug!("Using built-in plugin catalog");
                Ok(Self::builtin())
            }
        }
    }

    pub fn plugins(&self) -> &[PluginEntry] {
        &self.plugins
    }

    pub fn get(&self, id: &str) -> Option<&PluginEntry> {
        self.plugins.iter().find(|p| p.id == id)
    }

    /// Looks up a plugin that may be selected.
    pub fn selectable(&self, id: &str) -> Result<&PluginEntry> {
        match self.get(id) {
            Some(plugin) if plugin.enabled => Ok(plugin),
            Some(plugin) => bail!("{} is not available yet.", plugin.name),
            None => bail!(
                "Unknown plugin: {}. Expected one of: {}.",
                id,
                self.plugins
                    .iter()
                    .map(|p| p.id.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        }
    }

    /// The plugin selected when the page mounts: the first enabled entry.
    pub fn default_plugin(&self) -> &PluginEntry {
        self.plugins
            .iter()
            .find(|p| p.enabled)
            .unwrap_or(&self.plugins[0])
    }
}
