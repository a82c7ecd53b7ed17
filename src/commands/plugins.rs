use anyhow::Result;
use std::io::Write;

use crate::browser::PluginTab;
use crate::catalog::Catalog;
use crate::render::render_plugins;

/// Lists the plugin catalog, marking the default selection.
pub fn run<W: Write>(catalog: &Catalog, out: &mut W) -> Result<()> {
    let default_id = catalog.default_plugin().id.as_str();
    let tabs: Vec<PluginTab> = catalog
        .plugins()
        .iter()
        .map(|p| PluginTab {
            id: p.id.clone(),
            name: p.name.clone(),
            description: p.description.clone(),
            enabled: p.enabled,
            selected: p.id == default_id,
        })
        .collect();
    render_plugins(&tabs, out)
}
