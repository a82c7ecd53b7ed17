//! Plain-text rendering of page views.

use anyhow::Result;
use std::io::Write;

use crate::browser::{BuildPanelView, Downloads, PageView, PluginTab, ReleaseListView};

pub fn render_plugins<W: Write>(plugins: &[PluginTab], out: &mut W) -> Result<()> {
    for plugin in plugins {
        let marker = if plugin.selected { "*" } else { " " };
        write!(out, "{} {:<8} {}", marker, plugin.id, plugin.name)?;
        if !plugin.description.is_empty() {
            write!(out, " - {}", plugin.description)?;
        }
        if !plugin.enabled {
            write!(out, " (coming soon)")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn render_releases<W: Write>(view: &PageView, out: &mut W) -> Result<()> {
    writeln!(out, "Releases of {} [{}]", view.repo, view.channel)?;
    writeln!(out, "{}", view.channel_description)?;
    writeln!(out)?;

    match &view.releases {
        ReleaseListView::Loading => writeln!(out, "Fetching release information...")?,
        ReleaseListView::Error {
            message,
            releases_url,
        } => {
            writeln!(out, "Failed to fetch release information.")?;
            writeln!(out, "  {}", message)?;
            writeln!(out, "  Browse the releases page instead: {}", releases_url)?;
        }
        ReleaseListView::Empty { repo_url } => {
            writeln!(out, "No releases in this category.")?;
            writeln!(
                out,
                "  Try another channel or visit the repository: {}",
                repo_url
            )?;
        }
        ReleaseListView::Ready { releases } => {
            for (i, card) in releases.iter().enumerate() {
                if i > 0 {
                    writeln!(out)?;
                }
                writeln!(out, "{}  ({}, {})", card.title, card.badge.label(), card.date)?;
                writeln!(out, "  details: {}", card.html_url)?;
                match &card.downloads {
                    Downloads::Files { files } => {
                        for file in files {
                            writeln!(out, "  {} [{}]", file.name, file.size)?;
                            writeln!(out, "    {}", file.url)?;
                        }
                    }
                    Downloads::SourceArchive { url } => {
                        writeln!(out, "  No downloadable files for this release.")?;
                        writeln!(out, "  source code: {}", url)?;
                    }
                }
            }
        }
    }
    Ok(())
}

pub fn render_builds<W: Write>(view: &PageView, out: &mut W) -> Result<()> {
    let actions_url = match &view.builds {
        BuildPanelView::Collapsed => return Ok(()),
        BuildPanelView::Loading { actions_url } => {
            writeln!(out, "Recent builds of {}", view.repo)?;
            writeln!(out, "Fetching build information...")?;
            actions_url
        }
        BuildPanelView::Notice {
            message,
            actions_url,
        }
        | BuildPanelView::Warning {
            message,
            actions_url,
        } => {
            writeln!(out, "Recent builds of {}", view.repo)?;
            writeln!(out, "{}", message)?;
            actions_url
        }
        BuildPanelView::Ready {
            builds,
            actions_url,
        } => {
            writeln!(out, "Recent builds of {}", view.repo)?;
            for build in builds {
                writeln!(
                    out,
                    "{}  [{}] {} {}",
                    build.title, build.status_label, build.branch, build.date
                )?;
                writeln!(out, "  {}", build.url)?;
            }
            actions_url
        }
    };
    writeln!(out, "All builds: {}", actions_url)?;
    Ok(())
}

/// Renders the whole page: selector, release list and, when open, the build panel.
pub fn render_page<W: Write>(view: &PageView, out: &mut W) -> Result<()> {
    render_plugins(&view.plugins, out)?;
    writeln!(out)?;
    render_releases(view, out)?;
    if view.builds != BuildPanelView::Collapsed {
        writeln!(out)?;
        render_builds(view, out)?;
    }
    Ok(())
}

pub fn render_json<W: Write, T: serde::Serialize>(value: &T, out: &mut W) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
