//! Integrity verification of the installed binary.

use std::path::Path;

use setup_tombi_core::{Error, Result};
use sha2::{Digest, Sha256};
use tokio::io::AsyncReadExt;
use tracing::{debug, info};

/// Verify the file at `path` against an optionally supplied SHA-256 digest.
///
/// A no-op when no digest was supplied. The comparison is exact-match only,
/// case-insensitive over the hex encoding.
///
/// # Errors
///
/// Fails with a missing-binary error when there is nothing at `path` to
/// hash, and with an integrity error carrying both the expected and
/// computed digests when they differ.
pub async fn verify(path: &Path, expected: Option<&str>) -> Result<()> {
    let Some(expected) = expected else {
        debug!("no checksum supplied; skipping verification");
        return Ok(());
    };

    if !path.exists() {
        return Err(Error::binary_missing(path));
    }

    let computed = sha256_file(path).await?;
    if !computed.eq_ignore_ascii_case(expected) {
        return Err(Error::integrity(expected, computed));
    }

    info!(%computed, "checksum verification passed");
    Ok(())
}

/// Compute the SHA-256 hash of a file, hex encoded in lowercase.
pub async fn sha256_file(path: &Path) -> Result<String> {
    let mut file = tokio::fs::File::open(path).await?;
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; 8192];

    loop {
        let n = file.read(&mut buffer).await?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}
