//! JSON-over-HTTP client for the release-hosting API.

use anyhow::{Context, Result};
use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;

use super::error::ApiError;

/// HTTP client for read-only JSON endpoints.
///
/// Requests are attempted once. A failed request surfaces to the caller, which
/// decides how to present it.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Creates a new HTTP client wrapping the given reqwest Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Returns a reference to the underlying reqwest Client.
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Performs a GET request and deserializes the JSON response.
    #[tracing::instrument(skip(self))]
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        self.get_json_with_query(url, &[]).await
    }

    /// Performs a GET request with query parameters and deserializes the JSON response.
    #[tracing::instrument(skip(self, query))]
    pub async fn get_json_with_query<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        debug!("GET JSON from {} with query {:?}...", url, query);

        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .context("Failed to send request to GitHub API")?;

        let status = response.status();
        if !status.is_success() {
            let err = ApiError::from_response(status, response.headers());
            debug!("{} answered {}", url, status);
            return Err(err.into());
        }

        response
            .json::<T>()
            .await
            .context("Failed to parse JSON response from GitHub API")
    }
}
