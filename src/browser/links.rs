use crate::source::RepoId;

pub const DEFAULT_WEB_URL: &str = "https://github.com";

/// Builds outbound links to the hosting site's web pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Links {
    web_url: String,
}

impl Default for Links {
    fn default() -> Self {
        Self::new(DEFAULT_WEB_URL)
    }
}

impl Links {
    pub fn new(web_url: &str) -> Self {
        Self {
            web_url: web_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn repo_url(&self, repo: &RepoId) -> String {
        format!("{}/{}/{}", self.web_url, repo.owner, repo.repo)
    }

    pub fn releases_url(&self, repo: &RepoId) -> String {
        format!("{}/releases", self.repo_url(repo))
    }

    pub fn actions_url(&self, repo: &RepoId) -> String {
        format!("{}/actions", self.repo_url(repo))
    }

    pub fn run_url(&self, repo: &RepoId, run_id: u64) -> String {
        format!("{}/runs/{}", self.actions_url(repo), run_id)
    }
}
