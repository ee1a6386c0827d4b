//! HTTP client for the Qobuz catalog API
//!
//! This module provides a small, stateless client for the only
//! catalog operation PartyQueue needs: track search. Results are
//! normalized before they leave the client.
//!
//! # Example
//!
//! ```no_run
//! use pqqobuz::QobuzClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = QobuzClient::builder()
//!         .app_id("my-app-id")
//!         .build()?;
//!
//!     let page = client.search_tracks("daft punk", None, None).await?;
//!     for track in &page.items {
//!         println!("{} - {}", track.artist, track.title);
//!     }
//!     Ok(())
//! }
//! ```

use crate::error::{QobuzError, Result};
use crate::models::{normalize_track, NormalizedTrack, SearchResponse};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};
use utoipa::ToSchema;

/// Default Qobuz API base URL
pub const DEFAULT_BASE_URL: &str = "https://www.qobuz.com/api.json/0.2";

/// Total timeout for a single request (seconds)
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Connection establishment timeout (seconds)
pub const CONNECT_TIMEOUT_SECS: u64 = 5;

/// Retries after a retryable failure (server errors, transport)
pub const MAX_RETRIES: u32 = 2;

/// Base delay between retries, doubled at each attempt
const RETRY_BASE_DELAY_MS: u64 = 250;

/// Default page size when the caller does not specify one
pub const DEFAULT_LIMIT: u32 = 20;

/// Upstream hard cap on page size
pub const MAX_LIMIT: u32 = 200;

/// A normalized page of search results
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SearchPage {
    pub items: Vec<NormalizedTrack>,
    /// Total hits reported by the upstream (not the page size)
    pub total: u64,
}

/// Qobuz catalog HTTP client
///
/// The client is stateless and cheap to clone; it holds only the
/// reqwest connection pool and the adapter settings.
#[derive(Debug, Clone)]
pub struct QobuzClient {
    client: Client,
    base_url: String,
    app_id: String,
}

impl QobuzClient {
    /// Create a builder for configuring the client
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Search tracks in the Qobuz catalog
    ///
    /// The query must contain at least one non-whitespace character.
    /// `limit` is clamped to `[1, 200]` and defaults to 20; `offset`
    /// defaults to 0. Server errors are retried up to [`MAX_RETRIES`]
    /// times with exponential delay; client errors are never retried.
    pub async fn search_tracks(
        &self,
        query: &str,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<SearchPage> {
        let query = query.trim();
        if query.is_empty() {
            return Err(QobuzError::InvalidQuery(
                "Query cannot be blank.".to_string(),
            ));
        }

        let limit = limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        let offset = offset.unwrap_or(0);

        let url = format!("{}/search/getResults", self.base_url);

        let mut attempt = 0;
        loop {
            match self.search_once(&url, query, limit, offset).await {
                Ok(page) => return Ok(page),
                Err(err) if err.is_retryable() && attempt < MAX_RETRIES => {
                    let delay = Duration::from_millis(RETRY_BASE_DELAY_MS << attempt);
                    warn!(
                        attempt = attempt + 1,
                        error = %err,
                        "Qobuz search failed, retrying after {:?}", delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn search_once(
        &self,
        url: &str,
        query: &str,
        limit: u32,
        offset: u32,
    ) -> Result<SearchPage> {
        debug!(query, limit, offset, "Searching Qobuz catalog");

        let response = self
            .client
            .get(url)
            .query(&[
                ("query", query),
                ("limit", &limit.to_string()),
                ("offset", &offset.to_string()),
                ("app_id", &self.app_id),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(QobuzError::Upstream {
                status: status.as_u16(),
                message: truncate(&message, 200),
            });
        }

        let payload: SearchResponse = response.json().await?;
        let items: Vec<_> = payload
            .tracks
            .items
            .into_iter()
            .map(normalize_track)
            .collect();
        Ok(SearchPage {
            total: payload.tracks.total.unwrap_or(items.len() as u64),
            items,
        })
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        s.chars().take(max).collect()
    }
}

/// Builder for [`QobuzClient`]
#[derive(Debug, Default)]
pub struct ClientBuilder {
    base_url: Option<String>,
    app_id: Option<String>,
    client: Option<Client>,
}

impl ClientBuilder {
    /// Override the base URL (tests, proxies)
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the Qobuz application id (required)
    pub fn app_id(mut self, app_id: impl Into<String>) -> Self {
        self.app_id = Some(app_id.into());
        self
    }

    /// Use a custom reqwest::Client (shared pools, proxies)
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Build the client
    ///
    /// Fails if the app id is missing or the HTTP client cannot be
    /// constructed.
    pub fn build(self) -> Result<QobuzClient> {
        let app_id = match self.app_id {
            Some(app_id) if !app_id.trim().is_empty() => app_id,
            _ => {
                return Err(QobuzError::Configuration(
                    "Qobuz app_id is not configured.".to_string(),
                ))
            }
        };

        let client = match self.client {
            Some(client) => client,
            None => Client::builder()
                .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
                .build()?,
        };

        Ok(QobuzClient {
            client,
            base_url: self
                .base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            app_id,
        })
    }
}
