use anyhow::Result;
use log::debug;
use std::io::Write;

use crate::domain::model::Channel;
use crate::render::{render_json, render_releases};
use crate::session::{Action, Session};
use crate::source::ReleaseSource;

use super::config::Config;

/// Fetches and prints the releases of one plugin under `channel`.
///
/// Fetch failures are part of the rendered page, not an error of the command.
#[tracing::instrument(skip(config, out))]
pub async fn run<S: ReleaseSource + 'static, W: Write>(
    config: Config<S>,
    plugin: Option<&str>,
    channel: Channel,
    json: bool,
    out: &mut W,
) -> Result<()> {
    let mut session = Session::mount(config.source, config.catalog, config.links, plugin)?;
    session.dispatch(Action::SetChannel(channel))?;
    session.settle().await;

    let view = session.view();
    debug!("Rendering releases of {} ({})", view.repo, view.channel);
    if json {
        render_json(&view.releases, out)
    } else {
        render_releases(&view, out)
    }
}
