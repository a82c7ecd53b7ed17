use anyhow::Result;
use std::io::Write;

use crate::{domain::model::Channel, runtime::Runtime};

pub mod browse;
pub mod builds;
pub mod config;
pub mod plugins;
pub mod releases;

pub use config::{Config, Options};

/// List the plugin catalog
#[tracing::instrument(skip(runtime))]
pub fn plugins<R: Runtime>(runtime: R, options: &Options) -> Result<()> {
    let config = Config::new(&runtime, options)?;
    let mut out = std::io::stdout().lock();
    plugins::run(&config.catalog, &mut out)?;
    out.flush()?;
    Ok(())
}

/// Show the releases of a plugin
#[tracing::instrument(skip(runtime))]
pub async fn releases<R: Runtime>(
    runtime: R,
    options: &Options,
    plugin: Option<&str>,
    channel: Channel,
    json: bool,
) -> Result<()> {
    let config = Config::new(&runtime, options)?;
    let mut out = std::io::stdout();
    releases::run(config, plugin, channel, json, &mut out).await
}

/// Show the recent CI builds of a plugin
#[tracing::instrument(skip(runtime))]
pub async fn builds<R: Runtime>(
    runtime: R,
    options: &Options,
    plugin: Option<&str>,
    json: bool,
) -> Result<()> {
    let config = Config::new(&runtime, options)?;
    let mut out = std::io::stdout();
    builds::run(config, plugin, json, &mut out).await
}

/// Browse releases and builds interactively from standard input
#[tracing::instrument(skip(runtime))]
pub async fn browse<R: Runtime>(runtime: R, options: &Options, plugin: Option<&str>) -> Result<()> {
    let config = Config::new(&runtime, options)?;
    let input = tokio::io::BufReader::new(tokio::io::stdin());
    let mut out = std::io::stdout();
    browse::run(config, plugin, input, &mut out).await
}
