//! Script-based acquisition for posix platforms.
//!
//! Downloads the vendor install script to a temporary path, marks it
//! executable, and runs it through `sh`. The install directory is passed
//! explicitly so the script's own platform detection cannot disagree with
//! ours, and the directory is put on the child's `PATH` because the script
//! checks for it there.
//!
//! The script's exit code is advisory only: some versions of it are known
//! to report spurious failure after a correct install, so a non-zero exit
//! is logged and the run relies on the later binary-presence check.

use async_trait::async_trait;
use reqwest::Client;
use setup_tombi_core::actions;
use setup_tombi_core::{Error, Result};
use tokio::process::Command;
use tracing::{debug, info, warn};

use super::{AcquireRequest, AcquisitionOutcome, AcquisitionStrategy};

/// Default location of the vendor install script. Version-agnostic; the
/// script receives the version as an argument.
pub const DEFAULT_SCRIPT_URL: &str = "https://tombi-toml.github.io/tombi/install.sh";

/// Acquires the binary by running the vendor install script.
pub struct ScriptStrategy {
    client: Client,
    script_url: String,
}

impl ScriptStrategy {
    /// Create a script strategy downloading from the given URL.
    #[must_use]
    pub fn new(client: Client, script_url: String) -> Self {
        Self { client, script_url }
    }

    /// Download the install script into `dir` and mark it executable.
    async fn download_script(&self, dir: &std::path::Path) -> Result<std::path::PathBuf> {
        debug!(url = %self.script_url, "downloading install script");

        let response = self.client.get(&self.script_url).send().await.map_err(|e| {
            Error::acquisition(&self.script_url, format!("Failed to download install script: {e}"))
        })?;

        if !response.status().is_success() {
            return Err(Error::acquisition(
                &self.script_url,
                format!(
                    "Failed to download install script (HTTP {})",
                    response.status()
                ),
            ));
        }

        let body = response.bytes().await.map_err(|e| {
            Error::acquisition(&self.script_url, format!("Failed to read install script: {e}"))
        })?;

        let script_path = dir.join("install.sh");
        tokio::fs::write(&script_path, &body).await?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = tokio::fs::metadata(&script_path).await?.permissions();
            perms.set_mode(0o755);
            tokio::fs::set_permissions(&script_path, perms).await?;
        }

        Ok(script_path)
    }
}

#[async_trait]
impl AcquisitionStrategy for ScriptStrategy {
    fn name(&self) -> &'static str {
        "script"
    }

    async fn acquire(&self, request: &AcquireRequest<'_>) -> Result<AcquisitionOutcome> {
        // Holds the script for the duration of the run; cleaned up on drop.
        let temp_dir = tempfile::tempdir()?;
        let script_path = self.download_script(temp_dir.path()).await?;

        let mut cmd = Command::new("sh");
        cmd.arg(&script_path)
            .arg("--install-dir")
            .arg(&request.layout.install_dir);
        if request.explicit_version {
            cmd.arg("--version").arg(request.version);
        }

        // The script verifies that the install dir is on PATH before it
        // places the binary, so the child gets the augmented value.
        cmd.env("PATH", actions::prepend_to_path(&request.layout.install_dir)?);

        info!(
            script = %script_path.display(),
            install_dir = %request.layout.install_dir.display(),
            version = %request.version,
            "running install script"
        );

        let output = cmd.output().await.map_err(|e| {
            Error::acquisition(
                &self.script_url,
                format!("Failed to run install script: {e}"),
            )
        })?;

        let status = output.status.code();
        if output.status.success() {
            debug!(?status, "install script completed");
        } else {
            // Advisory only. The script is known to misreport; the
            // binary-presence check downstream is authoritative.
            warn!(
                ?status,
                stderr = %String::from_utf8_lossy(&output.stderr),
                "install script reported failure; relying on binary presence check"
            );
        }

        Ok(AcquisitionOutcome {
            strategy: self.name(),
            binary_path: request.layout.binary_path(),
            script_status: status,
        })
    }
}
