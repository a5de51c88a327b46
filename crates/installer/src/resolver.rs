//! Version resolution.
//!
//! Turns the user-supplied version token into a concrete version string.
//! Explicit tokens pass through verbatim; empty or `latest` tokens are
//! resolved through the upstream release index with a single request.

use reqwest::Client;
use serde::Deserialize;
use setup_tombi_core::{Error, Result};
use tracing::{debug, info};

/// Default release-metadata endpoint for the latest tombi release.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// The `latest` sentinel accepted in version inputs.
const LATEST: &str = "latest";

/// Release metadata from the GitHub API. Only the tag is of interest.
#[derive(Debug, Deserialize)]
struct Release {
    tag_name: String,
}

/// Resolves version tokens against the upstream release index.
pub struct VersionResolver {
    client: Client,
    api_base: String,
    token: Option<String>,
}

impl VersionResolver {
    /// Create a resolver talking to the given API base URL.
    #[must_use]
    pub fn new(client: Client, api_base: String, token: Option<String>) -> Self {
        Self {
            client,
            api_base,
            token,
        }
    }

    /// Resolve a version token to a concrete version string.
    ///
    /// A present, non-`latest` token is returned verbatim; a malformed one
    /// will fail naturally during acquisition. Empty and `latest` tokens
    /// trigger exactly one metadata request, whose newest tag is returned
    /// with a leading `v` stripped.
    ///
    /// # Errors
    ///
    /// Fails with a version resolution error when the metadata request does
    /// not succeed; the message carries the upstream status text so
    /// operators can tell rate-limiting from outage.
    pub async fn resolve(&self, requested: Option<&str>) -> Result<String> {
        if let Some(token) = requested {
            if !token.is_empty() && token != LATEST {
                debug!(version = %token, "using explicitly requested version");
                return Ok(token.to_string());
            }
        }
        self.fetch_latest().await
    }

    /// Fetch the newest release tag from the metadata endpoint.
    async fn fetch_latest(&self) -> Result<String> {
        let url = format!(
            "{}/repos/tombi-toml/tombi/releases/latest",
            self.api_base.trim_end_matches('/')
        );
        debug!(%url, "fetching latest release metadata");

        let mut request = self.client.get(&url);
        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("Bearer {token}"));
        }

        let response = request.send().await.map_err(|e| {
            Error::version_resolution(format!("Failed to fetch latest version: {e}"))
        })?;

        let status = response.status();
        if !status.is_success() {
            let reason = status
                .canonical_reason()
                .map_or_else(|| status.as_str().to_string(), ToString::to_string);
            return Err(Error::version_resolution(format!(
                "Failed to fetch latest version: {reason}"
            )));
        }

        let release: Release = response.json().await.map_err(|e| {
            Error::version_resolution(format!("Failed to fetch latest version: {e}"))
        })?;

        let version = release
            .tag_name
            .strip_prefix('v')
            .unwrap_or(&release.tag_name)
            .to_string();
        info!(tag = %release.tag_name, %version, "resolved latest release");
        Ok(version)
    }
}
