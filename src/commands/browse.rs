use anyhow::{Result, bail};
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::domain::model::Channel;
use crate::render::render_page;
use crate::session::{Action, Session};
use crate::source::ReleaseSource;

use super::config::Config;

const HELP: &str = "\
Commands:
  plugin <id>        switch to another plugin
  channel <mode>     show stable, preview or all releases
  builds             open the recent builds panel
  refresh            fetch the recent builds again
  show               print the page again
  help               print this help
  quit               leave";

#[derive(Debug, PartialEq)]
enum Input {
    Action(Action),
    Show,
    Help,
    Quit,
}

fn parse_input(line: &str) -> Result<Option<Input>> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(None);
    };
    let arg = words.next();

    let input = match (command, arg) {
        ("plugin", Some(id)) => Input::Action(Action::SelectPlugin(id.to_string())),
        ("channel", Some(mode)) => Input::Action(Action::SetChannel(mode.parse::<Channel>()?)),
        ("builds", None) => Input::Action(Action::ExpandBuilds),
        ("refresh", None) => Input::Action(Action::RefreshBuilds),
        ("show", None) => Input::Show,
        ("help", None) => Input::Help,
        ("quit" | "exit", None) => Input::Quit,
        ("plugin" | "channel", None) => bail!("'{}' needs an argument. Type 'help'.", command),
        _ => bail!("Unknown command: {}. Type 'help'.", line.trim()),
    };
    Ok(Some(input))
}

/// Interactive page: reads commands line by line and re-renders whenever the
/// page changes. At end of input the pending fetches are awaited so piped
/// scripts see their final result.
#[tracing::instrument(skip(config, input, out))]
pub async fn run<S, I, W>(
    config: Config<S>,
    plugin: Option<&str>,
    input: I,
    out: &mut W,
) -> Result<()>
where
    S: ReleaseSource + 'static,
    I: AsyncBufRead + Unpin,
    W: Write,
{
    let mut session = Session::mount(config.source, config.catalog, config.links, plugin)?;
    let mut updates = session.subscribe();
    let mut lines = input.lines();

    render_page(&updates.borrow_and_update(), out)?;
    out.flush()?;

    loop {
        let busy = session.state().is_busy();
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    session.settle().await;
                    if updates.has_changed()? {
                        writeln!(out)?;
                        render_page(&updates.borrow_and_update(), out)?;
                    }
                    break;
                };

                match parse_input(&line) {
                    Ok(None) => {}
                    Ok(Some(Input::Quit)) => break,
                    Ok(Some(Input::Help)) => writeln!(out, "{}", HELP)?,
                    Ok(Some(Input::Show)) => {
                        writeln!(out)?;
                        render_page(&updates.borrow_and_update(), out)?;
                    }
                    Ok(Some(Input::Action(action))) => {
                        if let Err(e) = session.dispatch(action) {
                            writeln!(out, "{}", e)?;
                        }
                    }
                    Err(e) => writeln!(out, "{}", e)?,
                }
            }
            _ = session.next(), if busy => {}
        }

        if updates.has_changed()? {
            writeln!(out)?;
            render_page(&updates.borrow_and_update(), out)?;
        }
        out.flush()?;
    }

    Ok(())
}
