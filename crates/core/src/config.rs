//! Run configuration captured from the environment.
//!
//! All environment reads happen here, exactly once per run, so that the
//! installation steps themselves stay pure and independently testable.

use std::path::PathBuf;

use crate::errors::{Error, Result};

/// Environment variable holding an optional GitHub API token. Forwarded to
/// the release-metadata request to raise rate limits; its absence is a
/// warning, not an error.
pub const GITHUB_TOKEN_VAR: &str = "GITHUB_TOKEN";

/// Environment variable pointing at the GitHub Actions PATH export file.
pub const GITHUB_PATH_VAR: &str = "GITHUB_PATH";

/// Windows local application-data directory variable.
pub const LOCAL_APP_DATA_VAR: &str = "LOCALAPPDATA";

/// Everything an installation run needs from its caller and environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Requested version token: `None` and `latest` both mean "newest".
    pub version: Option<String>,
    /// Expected SHA-256 digest of the installed binary, hex encoded.
    pub checksum: Option<String>,
    /// GitHub API token, if advertised by the environment.
    pub github_token: Option<String>,
    /// GitHub Actions PATH export file, if running inside a workflow.
    pub github_path: Option<PathBuf>,
    /// The current user's home directory.
    pub home_dir: PathBuf,
    /// Windows local application-data directory, if advertised.
    pub local_app_data: Option<PathBuf>,
}

impl Config {
    /// Capture a run configuration from the caller's inputs and the
    /// process environment.
    ///
    /// Action inputs arrive as empty strings when unset; those are
    /// normalized to `None` here.
    ///
    /// # Errors
    ///
    /// Fails with a configuration error when no home directory can be
    /// determined, which makes every install location underivable.
    pub fn capture(version: Option<String>, checksum: Option<String>) -> Result<Self> {
        let home_dir = dirs::home_dir()
            .ok_or_else(|| Error::configuration("could not determine the home directory"))?;

        Ok(Self {
            version: normalize(version),
            checksum: normalize(checksum),
            github_token: normalize(std::env::var(GITHUB_TOKEN_VAR).ok()),
            github_path: std::env::var_os(GITHUB_PATH_VAR)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            home_dir,
            local_app_data: std::env::var_os(LOCAL_APP_DATA_VAR)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
        })
    }

    /// Whether the request is "latest"-equivalent: no version input, or the
    /// literal `latest` sentinel.
    #[must_use]
    pub fn wants_latest(&self) -> bool {
        match self.version.as_deref() {
            None => true,
            Some(v) => v == "latest",
        }
    }
}

/// Treat empty and whitespace-only strings as absent.
fn normalize(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_normalizes_empty_inputs() {
        temp_env::with_vars(
            [
                ("HOME", Some("/home/user")),
                (GITHUB_TOKEN_VAR, None),
                (GITHUB_PATH_VAR, None),
                (LOCAL_APP_DATA_VAR, None),
            ],
            || {
                let config = Config::capture(Some(String::new()), Some("  ".into())).unwrap();
                assert_eq!(config.version, None);
                assert_eq!(config.checksum, None);
                assert!(config.wants_latest());
            },
        );
    }

    #[test]
    fn test_capture_picks_up_environment() {
        temp_env::with_vars(
            [
                ("HOME", Some("/home/user")),
                (GITHUB_TOKEN_VAR, Some("ghp_testtoken")),
                (GITHUB_PATH_VAR, Some("/tmp/github_path")),
                (LOCAL_APP_DATA_VAR, Some("/tmp/appdata")),
            ],
            || {
                let config = Config::capture(Some("0.7.0".into()), None).unwrap();
                assert_eq!(config.version.as_deref(), Some("0.7.0"));
                assert_eq!(config.github_token.as_deref(), Some("ghp_testtoken"));
                assert_eq!(config.github_path, Some(PathBuf::from("/tmp/github_path")));
                assert_eq!(config.local_app_data, Some(PathBuf::from("/tmp/appdata")));
                assert!(!config.wants_latest());
            },
        );
    }

    #[test]
    fn test_wants_latest_sentinel() {
        temp_env::with_vars([("HOME", Some("/home/user"))], || {
            let config = Config::capture(Some("latest".into()), None).unwrap();
            assert!(config.wants_latest());
        });
    }
}
