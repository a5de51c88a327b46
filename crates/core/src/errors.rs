//! Error types for the setup-tombi ecosystem.
//!
//! Every step of an installation run fails with exactly one of these kinds;
//! nothing retries or suppresses a lower-level failure. The `Display` output
//! is the operator-facing message and is surfaced verbatim as the run's
//! failure reason, so variants render without extra decoration where the
//! message already carries the full context.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias using the setup-tombi [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// All error kinds produced by an installation run.
#[derive(Error, Debug)]
pub enum Error {
    /// The requested version token could not be resolved to a concrete
    /// version (metadata request failed or returned garbage).
    #[error("{message}")]
    VersionResolution {
        /// Operator-facing message, including the upstream status text.
        message: String,
    },

    /// Downloading or unpacking the tool failed. Carries the attempted URL
    /// so operators can retry it by hand.
    #[error("{message}: {url}")]
    Acquisition {
        /// The URL that was being fetched when the failure occurred.
        url: String,
        /// What went wrong.
        message: String,
    },

    /// The installed binary's content hash does not match the supplied
    /// checksum. Both digests are included for diagnosis.
    #[error("Checksum verification failed. Expected: {expected}, Got: {computed}")]
    Integrity {
        /// The digest the caller asked for.
        expected: String,
        /// The digest computed from the installed file.
        computed: String,
    },

    /// No file exists at the expected binary path after acquisition. This is
    /// the authoritative "install did not work" signal.
    #[error("Binary not found at {} after installation", path.display())]
    BinaryMissing {
        /// The path that was expected to hold the binary.
        path: PathBuf,
    },

    /// The installed binary did not answer its version query.
    #[error("{message}")]
    VersionProbe {
        /// Why the probe failed.
        message: String,
    },

    /// The host environment is misconfigured (for example, no home
    /// directory can be determined).
    #[error("Configuration error: {message}")]
    Configuration {
        /// What is missing or malformed.
        message: String,
    },

    /// Catch-all for failures that do not fit a more specific kind.
    #[error("Unexpected error: {message}")]
    Unexpected {
        /// Underlying error text.
        message: String,
    },
}

impl Error {
    /// Create a version resolution error.
    #[must_use]
    pub fn version_resolution(message: impl Into<String>) -> Self {
        Self::VersionResolution {
            message: message.into(),
        }
    }

    /// Create an acquisition error for the given URL.
    #[must_use]
    pub fn acquisition(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Acquisition {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create an integrity error from the expected and computed digests.
    #[must_use]
    pub fn integrity(expected: impl Into<String>, computed: impl Into<String>) -> Self {
        Self::Integrity {
            expected: expected.into(),
            computed: computed.into(),
        }
    }

    /// Create a missing-binary error for the given path.
    #[must_use]
    pub fn binary_missing(path: impl AsRef<Path>) -> Self {
        Self::BinaryMissing {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Create a version probe error.
    #[must_use]
    pub fn version_probe(message: impl Into<String>) -> Self {
        Self::VersionProbe {
            message: message.into(),
        }
    }

    /// Create a configuration error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an unexpected error.
    #[must_use]
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }

    /// Short name of the error kind, for structured log fields.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::VersionResolution { .. } => "version-resolution",
            Self::Acquisition { .. } => "acquisition",
            Self::Integrity { .. } => "integrity",
            Self::BinaryMissing { .. } => "binary-missing",
            Self::VersionProbe { .. } => "version-probe",
            Self::Configuration { .. } => "configuration",
            Self::Unexpected { .. } => "unexpected",
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Unexpected {
            message: format!("I/O operation failed: {err}"),
        }
    }
}
