//! Installation orchestration.
//!
//! Sequences one run through `Resolving -> Acquiring -> Verifying ->
//! Validating -> Succeeded`. Transitions are strictly sequential; the
//! first failure short-circuits everything that remains and surfaces with
//! its message intact. Each step is attempted exactly once per run; the
//! caller decides whether to retry the whole run.

use std::path::PathBuf;

use reqwest::Client;
use setup_tombi_core::actions;
use setup_tombi_core::config::{Config, GITHUB_TOKEN_VAR};
use setup_tombi_core::platform::{InstallLayout, Platform};
use setup_tombi_core::{Error, Result};
use tracing::{info, warn};

use crate::checksum;
use crate::resolver::{DEFAULT_API_BASE, VersionResolver};
use crate::strategy::{AcquireRequest, strategy_for};
use crate::strategy::{archive::DEFAULT_RELEASE_BASE, script::DEFAULT_SCRIPT_URL};
use crate::validate;

/// HTTP user agent for all requests in a run.
const USER_AGENT: &str = concat!("setup-tombi/", env!("CARGO_PKG_VERSION"));

/// Network endpoints a run talks to.
///
/// Defaults point at the upstream distribution; every one of them is
/// overridable, both for tests and in case upstream distribution changes.
#[derive(Debug, Clone)]
pub struct Endpoints {
    /// Base URL of the release-metadata API.
    pub api_base: String,
    /// Location of the vendor install script.
    pub script_url: String,
    /// Base URL for versioned release archives.
    pub release_base: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            script_url: DEFAULT_SCRIPT_URL.to_string(),
            release_base: DEFAULT_RELEASE_BASE.to_string(),
        }
    }
}

/// Terminal value of a successful run.
#[derive(Debug)]
pub struct InstallReport {
    /// Where the binary ended up.
    pub binary_path: PathBuf,
    /// The concrete version that was installed.
    pub version: String,
    /// What the binary said when probed with `--version`.
    pub reported_version: String,
}

/// One installation run.
///
/// Owns every transient value of the run; nothing is shared across
/// concurrent installs, and concurrent runs against the same install
/// directory are unsupported.
pub struct Installer {
    config: Config,
    platform: Platform,
    endpoints: Endpoints,
    client: Client,
}

impl Installer {
    /// Create an installer for the current platform.
    ///
    /// # Errors
    ///
    /// Fails when the HTTP client cannot be constructed, which indicates a
    /// broken TLS environment.
    pub fn new(config: Config) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::unexpected(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            config,
            platform: Platform::current(),
            endpoints: Endpoints::default(),
            client,
        })
    }

    /// Override the target platform. Intended for tests and cross-checks;
    /// acquisition still runs on the host.
    #[must_use]
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Override the network endpoints.
    #[must_use]
    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Run the installation to completion.
    ///
    /// # Errors
    ///
    /// Returns the first failure of any step, message preserved verbatim.
    /// Nothing is recovered locally; the one deliberate exception is the
    /// install script's own exit code, which is demoted to a warning
    /// inside the script strategy.
    pub async fn run(&self) -> Result<InstallReport> {
        let layout = InstallLayout::resolve(&self.platform, &self.config);
        info!(
            platform = %self.platform,
            install_dir = %layout.install_dir.display(),
            "installing tombi"
        );

        if self.config.github_token.is_none() {
            warn!(
                "{GITHUB_TOKEN_VAR} is not set; the release metadata request \
                 may be rate limited"
            );
        }

        // Resolving
        let resolver = VersionResolver::new(
            self.client.clone(),
            self.endpoints.api_base.clone(),
            self.config.github_token.clone(),
        );
        let version = resolver.resolve(self.config.version.as_deref()).await?;

        // The install dir goes on PATH before acquisition because the
        // install script checks for it there.
        actions::add_path(&layout.install_dir, self.config.github_path.as_deref())?;

        // Acquiring
        let strategy = strategy_for(&self.platform, self.client.clone(), &self.endpoints);
        let request = AcquireRequest {
            version: &version,
            explicit_version: !self.config.wants_latest(),
            layout: &layout,
            token: self.config.github_token.as_deref(),
        };
        let outcome = strategy.acquire(&request).await?;
        info!(
            strategy = outcome.strategy,
            script_status = ?outcome.script_status,
            binary = %outcome.binary_path.display(),
            "acquisition finished"
        );

        // Verifying
        checksum::verify(&outcome.binary_path, self.config.checksum.as_deref()).await?;

        // Validating
        let reported_version = validate::validate(&outcome.binary_path).await?;

        info!(%version, %reported_version, "tombi installed successfully");
        Ok(InstallReport {
            binary_path: outcome.binary_path,
            version,
            reported_version,
        })
    }
}
