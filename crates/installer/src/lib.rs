//! Installation orchestration engine for setup-tombi.
//!
//! Resolves a version token to a concrete release, selects a
//! platform-appropriate acquisition strategy (vendor install script on
//! posix, direct release archive on windows), verifies integrity when a
//! checksum was supplied, and confirms the installed binary answers a
//! version probe.
//!
//! # Example
//!
//! ```ignore
//! use setup_tombi_core::Config;
//! use setup_tombi_installer::Installer;
//!
//! let config = Config::capture(Some("0.7.11".into()), None)?;
//! let report = Installer::new(config)?.run().await?;
//! println!("installed {} at {}", report.version, report.binary_path.display());
//! ```

pub mod checksum;
pub mod install;
pub mod resolver;
pub mod strategy;
pub mod validate;

pub use install::{Endpoints, InstallReport, Installer};
pub use resolver::VersionResolver;
pub use strategy::{AcquireRequest, AcquisitionOutcome, AcquisitionStrategy, strategy_for};
