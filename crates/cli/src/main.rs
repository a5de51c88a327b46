//! setup-tombi CLI.
//!
//! Installs the tombi TOML toolkit binary for the current platform.
//! Designed to run as a GitHub Actions step: inputs arrive either as
//! flags or as `INPUT_*` environment variables, the install directory is
//! exported through `GITHUB_PATH`, and failures surface as `::error::`
//! workflow annotations with exit code 1.

// CLI binary needs to output to stdout/stderr - this is intentional
#![allow(clippy::print_stdout, clippy::print_stderr)]

use clap::Parser;
use setup_tombi_core::{Config, actions};
use setup_tombi_installer::Installer;

/// Exit code for a successful run.
const EXIT_OK: i32 = 0;
/// Exit code for a failed run.
const EXIT_FAILED: i32 = 1;

/// Install the tombi TOML toolkit CLI.
#[derive(Debug, Parser)]
#[command(name = "setup-tombi", disable_version_flag = true)]
struct Cli {
    /// Version of tombi to install: a concrete version like `0.7.11`, or
    /// `latest` (the default) for the newest release.
    #[arg(long = "version", env = "INPUT_VERSION")]
    version: Option<String>,

    /// Expected SHA-256 checksum of the installed binary, hex encoded.
    #[arg(long = "checksum", env = "INPUT_CHECKSUM")]
    checksum: Option<String>,
}

#[tokio::main]
async fn main() {
    // NOTE: Using eprintln! in the panic hook is intentional - tracing
    // infrastructure may be corrupted during a panic.
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panicked: {panic_info}");
        eprintln!("Internal error occurred. Run with RUST_LOG=debug for more information.");
    }));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();
    std::process::exit(run(cli).await);
}

/// Run one installation and map the outcome to an exit code.
async fn run(cli: Cli) -> i32 {
    let result = async {
        let config = Config::capture(cli.version, cli.checksum)?;
        Installer::new(config)?.run().await
    }
    .await;

    match result {
        Ok(report) => {
            actions::info(&format!(
                "Tombi {} installed successfully at {}",
                report.version,
                report.binary_path.display()
            ));
            EXIT_OK
        }
        Err(error) => {
            tracing::error!(kind = error.kind(), "installation failed");
            actions::set_failed(&error.to_string());
            EXIT_FAILED
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_inputs_from_flags() {
        let cli = Cli::parse_from([
            "setup-tombi",
            "--version",
            "0.7.11",
            "--checksum",
            "abc123",
        ]);
        assert_eq!(cli.version.as_deref(), Some("0.7.11"));
        assert_eq!(cli.checksum.as_deref(), Some("abc123"));
    }

    #[test]
    fn test_cli_inputs_are_optional() {
        let cli = Cli::parse_from(["setup-tombi"]);
        assert_eq!(cli.version, None);
        assert_eq!(cli.checksum, None);
    }
}
