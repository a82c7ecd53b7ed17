use anyhow::Result;
use log::debug;
use reqwest::{
    Client,
    header::{AUTHORIZATION, HeaderMap, HeaderValue},
};
use std::path::PathBuf;

use crate::{
    browser::Links,
    catalog::Catalog,
    runtime::Runtime,
    source::{DEFAULT_API_URL, GitHubSource, ReleaseSource},
};

/// Endpoint and catalog overrides collected from the command line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Options {
    pub api_url: Option<String>,
    pub web_url: Option<String>,
    pub catalog: Option<PathBuf>,
}

pub struct Config<S: ReleaseSource> {
    pub source: S,
    pub catalog: Catalog,
    pub links: Links,
}

impl Config<GitHubSource> {
    pub fn new<R: Runtime>(runtime: &R, options: &Options) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Ok(token) = runtime.env_var("GITHUB_TOKEN") {
            let mut auth_value = HeaderValue::from_str(&format!("Bearer {}", token))?;
            auth_value.set_sensitive(true);
            headers.insert(AUTHORIZATION, auth_value);
            debug!("Using GITHUB_TOKEN for authentication");
        }

        let client = Client::builder()
            .user_agent("ardl-cli")
            .default_headers(headers)
            .build()?;

        let api_url = options.api_url.as_deref().unwrap_or(DEFAULT_API_URL);
        let source = GitHubSource::with_api_url(client, api_url);
        let catalog = Catalog::load(runtime, options.catalog.as_deref())?;
        let links = options
            .web_url
            .as_deref()
            .map(Links::new)
            .unwrap_or_default();

        Ok(Self {
            source,
            catalog,
            links,
        })
    }
}
