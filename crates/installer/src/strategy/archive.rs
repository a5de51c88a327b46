//! Direct-archive acquisition for windows.
//!
//! Downloads the versioned, platform-named release archive and extracts
//! its contents flat into the install directory, bypassing the vendor
//! install script entirely.

use std::io::{Cursor, Read};
use std::path::Path;

use async_trait::async_trait;
use reqwest::Client;
use setup_tombi_core::platform::Arch;
use setup_tombi_core::{Error, Result};
use tracing::{debug, info};

use super::{AcquireRequest, AcquisitionOutcome, AcquisitionStrategy};

/// Default base URL for versioned release archives.
pub const DEFAULT_RELEASE_BASE: &str = "https://github.com/tombi-toml/tombi/releases/download";

/// Target triple used in release archive names for an architecture.
#[must_use]
pub fn arch_triple(arch: Arch) -> &'static str {
    match arch {
        Arch::X86_64 => "x86_64-pc-windows-msvc",
        Arch::Arm64 => "aarch64-pc-windows-msvc",
    }
}

/// Build the release archive URL for a version and architecture.
#[must_use]
pub fn archive_url(release_base: &str, version: &str, arch: Arch) -> String {
    format!(
        "{}/v{version}/tombi-cli-{version}-{}.zip",
        release_base.trim_end_matches('/'),
        arch_triple(arch)
    )
}

/// Acquires the binary from a versioned release archive.
pub struct ArchiveStrategy {
    client: Client,
    release_base: String,
    arch: Arch,
}

impl ArchiveStrategy {
    /// Create an archive strategy downloading from the given release base.
    #[must_use]
    pub fn new(client: Client, release_base: String, arch: Arch) -> Self {
        Self {
            client,
            release_base,
            arch,
        }
    }

    /// Download the archive, forwarding the token when present.
    async fn download(&self, url: &str, token: Option<&str>) -> Result<Vec<u8>> {
        debug!(%url, "downloading release archive");

        let mut request = self.client.get(url);
        if let Some(token) = token {
            request = request.header("Authorization", format!("Bearer {token}"));
        }

        let response = request.send().await.map_err(|e| {
            Error::acquisition(url, format!("Failed to download release archive: {e}"))
        })?;

        if !response.status().is_success() {
            return Err(Error::acquisition(
                url,
                format!(
                    "Failed to download release archive (HTTP {})",
                    response.status()
                ),
            ));
        }

        response.bytes().await.map(|b| b.to_vec()).map_err(|e| {
            Error::acquisition(url, format!("Failed to read release archive: {e}"))
        })
    }

    /// Extract the archive's contents flat into the install directory.
    fn extract(url: &str, data: &[u8], dest: &Path) -> Result<()> {
        let cursor = Cursor::new(data);
        let mut archive = zip::ZipArchive::new(cursor)
            .map_err(|e| Error::acquisition(url, format!("Failed to open archive: {e}")))?;

        std::fs::create_dir_all(dest)?;

        for i in 0..archive.len() {
            let mut file = archive
                .by_index(i)
                .map_err(|e| Error::acquisition(url, format!("Failed to read archive entry: {e}")))?;

            let Some(name) = file.enclosed_name() else {
                continue;
            };
            // Flat layout: the archive has no nested version folder, but
            // drop any directory components defensively all the same.
            let Some(file_name) = name.file_name() else {
                continue;
            };
            if file.is_dir() {
                continue;
            }

            let outpath = dest.join(file_name);
            let mut content = Vec::new();
            file.read_to_end(&mut content)?;
            std::fs::write(&outpath, &content)?;

            #[cfg(unix)]
            if let Some(mode) = file.unix_mode() {
                use std::os::unix::fs::PermissionsExt;
                let mut perms = std::fs::metadata(&outpath)?.permissions();
                perms.set_mode(mode);
                std::fs::set_permissions(&outpath, perms)?;
            }
        }

        Ok(())
    }
}

#[async_trait]
impl AcquisitionStrategy for ArchiveStrategy {
    fn name(&self) -> &'static str {
        "archive"
    }

    async fn acquire(&self, request: &AcquireRequest<'_>) -> Result<AcquisitionOutcome> {
        let url = archive_url(&self.release_base, request.version, self.arch);

        info!(
            %url,
            install_dir = %request.layout.install_dir.display(),
            "acquiring release archive"
        );

        let data = self.download(&url, request.token).await?;
        Self::extract(&url, &data, &request.layout.install_dir)?;

        Ok(AcquisitionOutcome {
            strategy: self.name(),
            binary_path: request.layout.binary_path(),
            script_status: None,
        })
    }
}
