//! Acquisition strategies.
//!
//! Two ways of getting the binary onto disk, selected purely by OS family:
//!
//! - [`ScriptStrategy`] (posix) - download and run the vendor install
//!   script
//! - [`ArchiveStrategy`] (windows) - download a versioned release archive
//!   and extract it directly
//!
//! The split exists because the install script handles archive formats
//! poorly on windows, so direct acquisition bypasses it entirely there.
//! This is a platform-specific workaround for the current upstream
//! distribution, kept overridable through the endpoint configuration.

pub mod archive;
pub mod script;

pub use archive::ArchiveStrategy;
pub use script::ScriptStrategy;

use std::path::PathBuf;

use async_trait::async_trait;
use reqwest::Client;
use setup_tombi_core::Result;
use setup_tombi_core::platform::{InstallLayout, OsFamily, Platform};

use crate::install::Endpoints;

/// Inputs a strategy needs for one acquisition.
pub struct AcquireRequest<'a> {
    /// The concrete version to install.
    pub version: &'a str,
    /// Whether the caller asked for this exact version (as opposed to a
    /// "latest"-equivalent request). The install script only receives a
    /// `--version` argument for explicit requests.
    pub explicit_version: bool,
    /// Where the binary goes and what it is called.
    pub layout: &'a InstallLayout,
    /// Optional API token, forwarded to authenticated downloads.
    pub token: Option<&'a str>,
}

/// What a strategy did, used only to drive the next step of the run.
#[derive(Debug)]
pub struct AcquisitionOutcome {
    /// Which strategy ran.
    pub strategy: &'static str,
    /// Where the binary is expected to be.
    pub binary_path: PathBuf,
    /// Exit code reported by the install script, when one ran. Advisory
    /// only; binary presence is the authoritative success signal.
    pub script_status: Option<i32>,
}

/// A way of fetching and placing the tool binary.
#[async_trait]
pub trait AcquisitionStrategy: Send + Sync {
    /// Strategy name, for logs and outcome records.
    fn name(&self) -> &'static str;

    /// Fetch the binary for `request.version` and place it into the
    /// install layout.
    async fn acquire(&self, request: &AcquireRequest<'_>) -> Result<AcquisitionOutcome>;
}

/// Select the acquisition strategy for a platform.
///
/// A pure function of the OS family: posix platforms go through the
/// vendor install script, windows goes straight to the release archive.
#[must_use]
pub fn strategy_for(
    platform: &Platform,
    client: Client,
    endpoints: &Endpoints,
) -> Box<dyn AcquisitionStrategy> {
    match platform.os.family() {
        OsFamily::Posix => Box::new(ScriptStrategy::new(client, endpoints.script_url.clone())),
        OsFamily::Windows => Box::new(ArchiveStrategy::new(
            client,
            endpoints.release_base.clone(),
            platform.arch,
        )),
    }
}
