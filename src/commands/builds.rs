use anyhow::Result;
use std::io::Write;

use crate::render::{render_builds, render_json};
use crate::session::{Action, Session};
use crate::source::ReleaseSource;

use super::config::Config;

/// Opens the build panel for one plugin and prints its recent builds.
#[tracing::instrument(skip(config, out))]
pub async fn run<S: ReleaseSource + 'static, W: Write>(
    config: Config<S>,
    plugin: Option<&str>,
    json: bool,
    out: &mut W,
) -> Result<()> {
    let mut session = Session::mount(config.source, config.catalog, config.links, plugin)?;
    session.dispatch(Action::ExpandBuilds)?;
    session.settle().await;

    let view = session.view();
    if json {
        render_json(&view.builds, out)
    } else {
        render_builds(&view, out)
    }
}
