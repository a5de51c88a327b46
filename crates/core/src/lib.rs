//! Core types for the setup-tombi ecosystem.
//!
//! This crate holds the pieces shared by the installer and the CLI:
//!
//! - [`errors`] - the error kinds every installation step fails with
//! - [`platform`] - OS/architecture detection and the install layout
//! - [`config`] - the run configuration captured once from the environment
//! - [`actions`] - GitHub Actions workflow-command and `PATH` plumbing

pub mod actions;
pub mod config;
pub mod errors;
pub mod platform;

pub use config::Config;
pub use errors::{Error, Result};
