//! GitHub Actions plumbing.
//!
//! The installer runs as an action step, so user-visible outcomes travel
//! through workflow commands on stdout and the `PATH` export travels
//! through the file named by `GITHUB_PATH`. Everything here degrades
//! gracefully when running outside a workflow.

use std::ffi::OsString;
use std::io::Write;
use std::path::Path;

use tracing::debug;

use crate::errors::{Error, Result};

/// Emit a plain informational line.
pub fn info(message: &str) {
    println!("{message}");
}

/// Emit a workflow warning annotation.
pub fn warning(message: &str) {
    println!("::warning::{}", escape_data(message));
}

/// Emit a workflow error annotation, marking the step as failed.
///
/// The caller is responsible for the non-zero exit code.
pub fn set_failed(message: &str) {
    println!("::error::{}", escape_data(message));
}

/// Export a directory onto `PATH` for subsequent workflow steps.
///
/// Appends the directory to the `GITHUB_PATH` file when one was captured.
/// Outside a workflow there is nothing durable to write to, so the export
/// is logged and skipped.
pub fn add_path(dir: &Path, github_path: Option<&Path>) -> Result<()> {
    match github_path {
        Some(file) => {
            let mut f = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(file)?;
            writeln!(f, "{}", dir.display())?;
            debug!(dir = %dir.display(), "exported install dir to GITHUB_PATH");
        }
        None => {
            debug!(
                dir = %dir.display(),
                "GITHUB_PATH not set; skipping PATH export"
            );
        }
    }
    Ok(())
}

/// Build a `PATH` value with `dir` prepended to the current one, suitable
/// for child processes of this run.
///
/// The install script checks that the tool's directory is already on
/// `PATH`, so the spawned script must see the augmented value even though
/// this process's own environment is left untouched.
pub fn prepend_to_path(dir: &Path) -> Result<OsString> {
    let current = std::env::var_os("PATH").unwrap_or_default();
    let paths = std::iter::once(dir.to_path_buf()).chain(std::env::split_paths(&current));
    std::env::join_paths(paths)
        .map_err(|e| Error::unexpected(format!("failed to build PATH value: {e}")))
}

/// Escape message data for a workflow command, per the Actions runner's
/// rules: `%`, carriage return, and newline are percent-encoded.
fn escape_data(data: &str) -> String {
    data.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_escape_data() {
        assert_eq!(escape_data("plain message"), "plain message");
        assert_eq!(escape_data("50% done"), "50%25 done");
        assert_eq!(escape_data("line one\nline two"), "line one%0Aline two");
        assert_eq!(escape_data("a\r\nb"), "a%0D%0Ab");
    }

    #[test]
    fn test_add_path_appends_to_github_path_file() {
        let dir = tempfile::tempdir().unwrap();
        let path_file = dir.path().join("github_path");
        std::fs::write(&path_file, "/already/there\n").unwrap();

        add_path(Path::new("/home/user/.local/bin"), Some(&path_file)).unwrap();

        let contents = std::fs::read_to_string(&path_file).unwrap();
        assert_eq!(contents, "/already/there\n/home/user/.local/bin\n");
    }

    #[test]
    fn test_add_path_creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path_file = dir.path().join("github_path");

        add_path(Path::new("/opt/bin"), Some(&path_file)).unwrap();

        let contents = std::fs::read_to_string(&path_file).unwrap();
        assert_eq!(contents, "/opt/bin\n");
    }

    #[test]
    fn test_add_path_without_github_path_is_a_noop() {
        add_path(Path::new("/home/user/.local/bin"), None).unwrap();
    }

    #[test]
    fn test_prepend_to_path_puts_dir_first() {
        let value = prepend_to_path(Path::new("/install/bin")).unwrap();
        let first: Vec<PathBuf> = std::env::split_paths(&value).collect();
        assert_eq!(first[0], PathBuf::from("/install/bin"));
    }
}
