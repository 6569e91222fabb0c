//! HTTP client for public profile pages.

mod username;

use std::time::Duration;

use reqwest::Client;
use tikstats_core::AppConfig;

use crate::error::ScraperError;

pub use username::{normalize_username, profile_url};

/// Fetches public profile pages, one GET per call.
///
/// A 404 is reported as [`ScraperError::ProfileNotFound`], any other non-2xx
/// as [`ScraperError::UnexpectedStatus`]. Nothing is retried.
///
/// Cloning is cheap: the underlying `reqwest::Client` shares its connection
/// pool between clones.
#[derive(Debug, Clone)]
pub struct ProfileClient {
    client: Client,
    base_url: String,
}

impl ProfileClient {
    /// Creates a `ProfileClient` rooted at `base_url` with the given timeout.
    ///
    /// `user_agent` is only sent when provided.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::InvalidBaseUrl`] if `base_url` is not an absolute URL.
    /// - [`ScraperError::Http`] if the underlying `reqwest::Client` cannot be
    ///   constructed (e.g., invalid TLS config).
    pub fn new(
        base_url: &str,
        timeout_secs: u64,
        user_agent: Option<&str>,
    ) -> Result<Self, ScraperError> {
        reqwest::Url::parse(base_url).map_err(|e| ScraperError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        let mut builder = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10));
        if let Some(ua) = user_agent {
            builder = builder.user_agent(ua);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// Builds a client from the profile settings in [`AppConfig`].
    ///
    /// # Errors
    ///
    /// Same as [`ProfileClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ScraperError> {
        Self::new(
            &config.profile_base_url,
            config.request_timeout_secs,
            config.user_agent.as_deref(),
        )
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the profile page URL for `username` on this client's base URL.
    ///
    /// # Errors
    ///
    /// See [`profile_url`].
    pub fn profile_url(&self, username: &str) -> Result<String, ScraperError> {
        profile_url(&self.base_url, username)
    }

    /// Fetches the raw HTML of `username`'s profile page.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::InvalidUsername`] — the username is empty or malformed.
    /// - [`ScraperError::ProfileNotFound`] — HTTP 404.
    /// - [`ScraperError::UnexpectedStatus`] — any other non-2xx status.
    /// - [`ScraperError::Http`] — network, TLS or timeout failure, or the body
    ///   could not be read.
    pub async fn fetch_profile_page(&self, username: &str) -> Result<String, ScraperError> {
        let url = self.profile_url(username)?;
        tracing::debug!(%url, "fetching profile page");

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ScraperError::ProfileNotFound { url });
        }

        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        tracing::debug!(%url, bytes = body.len(), "fetched profile page");
        Ok(body)
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
