//! Tests for error types

use setup_tombi_core::Error;
use std::path::Path;

#[test]
fn test_version_resolution_error() {
    let error = Error::version_resolution("Failed to fetch latest version: Not Found");
    assert_eq!(
        error.to_string(),
        "Failed to fetch latest version: Not Found"
    );
    assert_eq!(error.kind(), "version-resolution");
}

#[test]
fn test_acquisition_error_carries_url() {
    let error = Error::acquisition(
        "https://example.com/tombi.zip",
        "Failed to download release archive (HTTP 500)",
    );
    assert_eq!(
        error.to_string(),
        "Failed to download release archive (HTTP 500): https://example.com/tombi.zip"
    );
    assert_eq!(error.kind(), "acquisition");

    match error {
        Error::Acquisition { url, .. } => assert_eq!(url, "https://example.com/tombi.zip"),
        _ => panic!("Expected Acquisition variant"),
    }
}

#[test]
fn test_integrity_error_includes_both_digests() {
    let error = Error::integrity("abc123", "def456");
    assert_eq!(
        error.to_string(),
        "Checksum verification failed. Expected: abc123, Got: def456"
    );
    assert_eq!(error.kind(), "integrity");
}

#[test]
fn test_binary_missing_error() {
    let error = Error::binary_missing(Path::new("/home/user/.local/bin/tombi"));
    assert_eq!(
        error.to_string(),
        "Binary not found at /home/user/.local/bin/tombi after installation"
    );
    assert_eq!(error.kind(), "binary-missing");
}

#[test]
fn test_version_probe_error() {
    let error = Error::version_probe("version query produced no output");
    assert_eq!(error.to_string(), "version query produced no output");
    assert_eq!(error.kind(), "version-probe");
}

#[test]
fn test_configuration_error() {
    let error = Error::configuration("could not determine the home directory");
    assert_eq!(
        error.to_string(),
        "Configuration error: could not determine the home directory"
    );
    assert_eq!(error.kind(), "configuration");
}

#[test]
fn test_io_error_conversion() {
    use std::io;

    let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
    let error = Error::from(io_error);
    assert_eq!(error.kind(), "unexpected");
    assert!(error.to_string().contains("I/O operation failed"));
    assert!(error.to_string().contains("file not found"));
}

#[test]
fn test_error_variants_match() {
    let error = Error::version_resolution("test");
    match error {
        Error::VersionResolution { message } => assert_eq!(message, "test"),
        _ => panic!("Expected VersionResolution variant"),
    }

    let error = Error::integrity("expected", "computed");
    match error {
        Error::Integrity { expected, computed } => {
            assert_eq!(expected, "expected");
            assert_eq!(computed, "computed");
        }
        _ => panic!("Expected Integrity variant"),
    }
}
