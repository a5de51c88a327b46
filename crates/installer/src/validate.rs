//! Post-install validation.
//!
//! Binary presence at the expected path is the authoritative "did the
//! install actually work" signal, superseding whatever the acquisition
//! strategy reported. A present binary must also answer a version query,
//! since an installed-but-non-functional binary is not a success.

use std::path::Path;

use setup_tombi_core::{Error, Result};
use tokio::process::Command;
use tracing::{debug, info};

/// Confirm the binary exists and responds to `--version`.
///
/// Returns the version line the binary reported.
///
/// # Errors
///
/// Fails with a missing-binary error when nothing exists at `path`, and
/// with a version probe error when the binary cannot be run, exits
/// non-zero, or prints nothing.
pub async fn validate(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(Error::binary_missing(path));
    }
    debug!(binary = %path.display(), "binary present; probing version");

    let output = Command::new(path)
        .arg("--version")
        .output()
        .await
        .map_err(|e| {
            Error::version_probe(format!(
                "Failed to run {} --version: {e}",
                path.display()
            ))
        })?;

    if !output.status.success() {
        return Err(Error::version_probe(format!(
            "{} --version exited with status {:?}",
            path.display(),
            output.status.code()
        )));
    }

    let reported = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if reported.is_empty() {
        return Err(Error::version_probe(format!(
            "{} --version produced no output",
            path.display()
        )));
    }

    info!(version = %reported, "binary answered version probe");
    Ok(reported)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_binary_is_binary_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tombi");

        let err = validate(&path).await.unwrap_err();
        assert_eq!(err.kind(), "binary-missing");
        assert!(err.to_string().contains("after installation"));
    }

    #[cfg(unix)]
    fn write_stub(dir: &Path, body: &str) -> std::path::PathBuf {
        use std::os::unix::fs::PermissionsExt;
        let path = dir.join("tombi");
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_reports_version_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_stub(dir.path(), "echo 'tombi 0.7.11'");

        assert_eq!(validate(&path).await.unwrap(), "tombi 0.7.11");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_empty_output_is_a_probe_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_stub(dir.path(), "true");

        let err = validate(&path).await.unwrap_err();
        assert_eq!(err.kind(), "version-probe");
        assert!(err.to_string().contains("produced no output"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_nonzero_probe_exit_is_a_probe_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_stub(dir.path(), "exit 3");

        let err = validate(&path).await.unwrap_err();
        assert_eq!(err.kind(), "version-probe");
    }
}
