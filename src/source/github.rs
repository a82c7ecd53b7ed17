//! GitHub source implementation.

use anyhow::Result;
use async_trait::async_trait;
use log::debug;
use reqwest::Client;

use crate::domain::model::{Asset, Release, WorkflowRun};
use crate::http::HttpClient;

use super::{ReleaseSource, RepoId};

/// Number of raw CI runs requested per build fetch.
pub const RUNS_PER_PAGE: u32 = 10;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// GitHub API response types (internal).
mod api {
    use serde::Deserialize;

    #[derive(Deserialize, Debug)]
    pub struct Release {
        pub id: u64,
        pub tag_name: String,
        pub name: Option<String>,
        pub published_at: Option<String>,
        #[serde(default)]
        pub prerelease: bool,
        #[serde(default)]
        pub html_url: String,
        #[serde(default)]
        pub zipball_url: Option<String>,
        #[serde(default)]
        pub assets: Vec<Asset>,
    }

    #[derive(Deserialize, Debug)]
    pub struct Asset {
        pub id: u64,
        pub name: String,
        pub size: u64,
        pub browser_download_url: String,
    }

    #[derive(Deserialize, Debug)]
    pub struct WorkflowRuns {
        #[serde(default)]
        pub workflow_runs: Vec<WorkflowRun>,
    }

    #[derive(Deserialize, Debug)]
    pub struct WorkflowRun {
        pub id: u64,
        pub name: Option<String>,
        pub run_number: u64,
        pub head_branch: Option<String>,
        pub created_at: Option<String>,
        pub conclusion: Option<String>,
    }
}

/// GitHub source implementation.
pub struct GitHubSource {
    http_client: HttpClient,
    api_url: String,
}

impl GitHubSource {
    /// Create a new GitHub source with default API URL.
    pub fn new(client: Client) -> Self {
        Self::with_api_url(client, DEFAULT_API_URL)
    }

    /// Create a new GitHub source with custom API URL.
    pub fn with_api_url(client: Client, api_url: &str) -> Self {
        Self {
            http_client: HttpClient::new(client),
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    #[cfg(test)]
    pub(crate) fn http_client(&self) -> &HttpClient {
        &self.http_client
    }
}

#[async_trait]
impl ReleaseSource for GitHubSource {
    #[tracing::instrument(skip(self))]
    async fn get_releases(&self, repo: &RepoId) -> Result<Vec<Release>> {
        let url = format!("{}/repos/{}/{}/releases", self.api_url, repo.owner, repo.repo);
        debug!("Fetching releases from {}...", url);

        let releases: Vec<api::Release> = self.http_client.get_json(&url).await?;
        debug!("Fetched {} release(s) for {}", releases.len(), repo);
        Ok(releases.into_iter().map(Release::from).collect())
    }

    #[tracing::instrument(skip(self))]
    async fn get_workflow_runs(&self, repo: &RepoId) -> Result<Vec<WorkflowRun>> {
        let url = format!(
            "{}/repos/{}/{}/actions/runs",
            self.api_url, repo.owner, repo.repo
        );
        debug!("Fetching workflow runs from {}...", url);

        let per_page = RUNS_PER_PAGE.to_string();
        let runs: api::WorkflowRuns = self
            .http_client
            .get_json_with_query(&url, &[("per_page", per_page.as_str())])
            .await?;
        Ok(runs
            .workflow_runs
            .into_iter()
            .map(WorkflowRun::from)
            .collect())
    }
}

impl From<api::Release> for Release {
    fn from(r: api::Release) -> Self {
        Release {
            id: r.id,
            tag: r.tag_name,
            name: r.name,
            published_at: r.published_at,
            prerelease: r.prerelease,
            html_url: r.html_url,
            zipball_url: r.zipball_url.unwrap_or_default(),
            assets: r.assets.into_iter().map(|a| a.into()).collect(),
        }
    }
}

impl From<api::Asset> for Asset {
    fn from(a: api::Asset) -> Self {
        Asset {
            id: a.id,
            name: a.name,
            size: a.size,
            download_url: a.browser_download_url,
        }
    }
}

impl From<api::WorkflowRun> for WorkflowRun {
    fn from(r: api::WorkflowRun) -> Self {
        WorkflowRun {
            id: r.id,
            name: r.name,
            run_number: r.run_number,
            head_branch: r.head_branch,
            created_at: r.created_at,
            conclusion: r.conclusion,
        }
    }
}
