//! Origin Client
//!
//! Fetches request targets from the origin server.

use std::time::Duration;

use axum::body::Bytes;
use tracing::debug;

use crate::error::Result;

/// HTTP client bound to one origin base URL.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct OriginClient {
    client: reqwest::Client,
    base_url: String,
}

impl OriginClient {
    /// Creates a client for `base_url` with an optional per-request deadline.
    ///
    /// # Errors
    /// Fails if the HTTP client cannot be initialised (e.g. the TLS backend
    /// is unavailable).
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: base_url.into(),
        })
    }

    /// Returns the origin base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds the upstream URL by appending the request target verbatim.
    pub fn url_for(&self, path_and_query: &str) -> String {
        format!("{}{}", self.base_url, path_and_query)
    }

    /// Issues a GET for `path_and_query` and reads the whole body.
    ///
    /// The origin's status code is not checked: any response that arrives
    /// intact counts as a successful fetch.
    pub async fn fetch(&self, path_and_query: &str) -> Result<Bytes> {
        let url = self.url_for(path_and_query);
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        debug!(%url, %status, bytes = body.len(), "fetched from origin");
        Ok(body)
    }
}
