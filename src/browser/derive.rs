//! Pure derivations from fetched payloads to what the page shows.

use chrono::{DateTime, Utc};

use crate::domain::model::{Build, BuildStatus, Channel, Release, WorkflowRun};
use crate::source::RepoId;

use super::links::Links;

/// Keyword a CI run name must contain to count as a build.
pub const BUILD_KEYWORD: &str = "build";

/// Maximum number of builds shown in the panel.
pub const MAX_BUILDS: usize = 5;

/// Releases visible under `channel`, in source order.
pub fn filter_releases(releases: &[Release], channel: Channel) -> Vec<&Release> {
    releases.iter().filter(|r| channel.matches(r)).collect()
}

/// Keeps the runs whose name mentions a build, at most [`MAX_BUILDS`], and
/// maps them to [`Build`] records. Unnamed runs never match. Source order is
/// preserved.
pub fn recent_builds(runs: &[WorkflowRun], repo: &RepoId, links: &Links) -> Vec<Build> {
    runs.iter()
        .filter_map(|run| {
            let name = run.name.as_deref()?;
            name.to_lowercase()
                .contains(BUILD_KEYWORD)
                .then_some((run, name))
        })
        .take(MAX_BUILDS)
        .map(|(run, name)| Build {
            id: run.id,
            name: name.to_string(),
            number: run.run_number,
            branch: run
                .head_branch
                .clone()
                .unwrap_or_else(|| "unknown".to_string()),
            created_at: run.created_at.clone(),
            status: BuildStatus::from_conclusion(run.conclusion.as_deref()),
            url: links.run_url(repo, run.id),
        })
        .collect()
}

/// Formats an ISO 8601 timestamp as a calendar date.
///
/// Unparsable input is shown as-is; a missing timestamp shows as "unknown".
pub fn format_date(timestamp: Option<&str>) -> String {
    match timestamp {
        Some(ts) => match DateTime::parse_from_rfc3339(ts) {
            Ok(dt) => dt.with_timezone(&Utc).format("%Y-%m-%d").to_string(),
            Err(_) => ts.to_string(),
        },
        None => "unknown".to_string(),
    }
}

/// Human-readable size in megabytes with two decimals.
pub fn format_size(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / (1024.0 * 1024.0))
}
