//! Platform detection and install layout.
//!
//! Identifies the operating system and CPU architecture, and derives from
//! them the canonical per-user install directory and binary file name.
//! Detection happens once per run; the resulting values are immutable.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::Config;

/// Name of the tool being installed.
pub const TOOL_NAME: &str = "tombi";

/// Platform identifier combining OS and architecture.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Platform {
    pub os: Os,
    pub arch: Arch,
}

impl Platform {
    /// Create a new platform.
    #[must_use]
    pub fn new(os: Os, arch: Arch) -> Self {
        Self { os, arch }
    }

    /// Get the current platform.
    #[must_use]
    pub fn current() -> Self {
        Self {
            os: Os::current(),
            arch: Arch::current(),
        }
    }

    /// Parse from string like "linux-x86_64".
    pub fn parse(s: &str) -> Option<Self> {
        let (os, arch) = s.split_once('-')?;
        Some(Self {
            os: Os::parse(os)?,
            arch: Arch::parse(arch)?,
        })
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.os, self.arch)
    }
}

/// Operating system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Os {
    Linux,
    Darwin,
    Windows,
}

impl Os {
    /// Get the current OS.
    #[must_use]
    pub fn current() -> Self {
        #[cfg(target_os = "macos")]
        return Self::Darwin;
        #[cfg(target_os = "windows")]
        return Self::Windows;
        // Anything else that gets this far is close enough to Linux for the
        // install script to sort out.
        #[cfg(not(any(target_os = "macos", target_os = "windows")))]
        return Self::Linux;
    }

    /// Parse from string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "linux" => Some(Self::Linux),
            "darwin" | "macos" => Some(Self::Darwin),
            "windows" | "win32" => Some(Self::Windows),
            _ => None,
        }
    }

    /// The OS family, which is what acquisition strategy selection keys on.
    #[must_use]
    pub fn family(self) -> OsFamily {
        match self {
            Self::Linux | Self::Darwin => OsFamily::Posix,
            Self::Windows => OsFamily::Windows,
        }
    }
}

impl std::fmt::Display for Os {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Linux => write!(f, "linux"),
            Self::Darwin => write!(f, "darwin"),
            Self::Windows => write!(f, "windows"),
        }
    }
}

/// Coarse OS family distinguishing path/PATH and interpreter conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OsFamily {
    Posix,
    Windows,
}

/// CPU architecture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arch {
    Arm64,
    X86_64,
}

impl Arch {
    /// Get the current architecture.
    #[must_use]
    pub fn current() -> Self {
        #[cfg(target_arch = "aarch64")]
        return Self::Arm64;
        #[cfg(not(target_arch = "aarch64"))]
        return Self::X86_64;
    }

    /// Parse from string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "arm64" | "aarch64" => Some(Self::Arm64),
            "x86_64" | "amd64" | "x64" => Some(Self::X86_64),
            _ => None,
        }
    }
}

impl std::fmt::Display for Arch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Arm64 => write!(f, "arm64"),
            Self::X86_64 => write!(f, "x86_64"),
        }
    }
}

/// Where the binary goes and what it is called on a given platform.
///
/// Derived once per run from the platform and the captured environment.
/// The install directory is always a per-user path writable without
/// elevated privilege.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallLayout {
    /// Directory the binary is installed into.
    pub install_dir: PathBuf,
    /// File name of the binary, including the platform executable suffix.
    pub binary_name: String,
}

impl InstallLayout {
    /// Derive the install layout for a platform from the captured config.
    ///
    /// On posix this is `$HOME/.local/bin`; on windows it is
    /// `%LOCALAPPDATA%\tombi\bin`, falling back to `<home>\.tombi\bin`
    /// when `LOCALAPPDATA` is not advertised by the environment.
    #[must_use]
    pub fn resolve(platform: &Platform, config: &Config) -> Self {
        let install_dir = match platform.os.family() {
            OsFamily::Posix => config.home_dir.join(".local").join("bin"),
            OsFamily::Windows => config.local_app_data.as_ref().map_or_else(
                || config.home_dir.join(".tombi").join("bin"),
                |app_data| app_data.join(TOOL_NAME).join("bin"),
            ),
        };

        let binary_name = match platform.os.family() {
            OsFamily::Posix => TOOL_NAME.to_string(),
            OsFamily::Windows => format!("{TOOL_NAME}.exe"),
        };

        Self {
            install_dir,
            binary_name,
        }
    }

    /// Full path the installed binary is expected at.
    #[must_use]
    pub fn binary_path(&self) -> PathBuf {
        self.install_dir.join(&self.binary_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(home: &str, local_app_data: Option<&str>) -> Config {
        Config {
            version: None,
            checksum: None,
            github_token: None,
            github_path: None,
            home_dir: PathBuf::from(home),
            local_app_data: local_app_data.map(PathBuf::from),
        }
    }

    #[test]
    fn test_platform_parse() {
        let p = Platform::parse("linux-x86_64").unwrap();
        assert_eq!(p.os, Os::Linux);
        assert_eq!(p.arch, Arch::X86_64);

        let p = Platform::parse("windows-arm64").unwrap();
        assert_eq!(p.os, Os::Windows);
        assert_eq!(p.arch, Arch::Arm64);

        assert!(Platform::parse("invalid").is_none());
        assert!(Platform::parse("linux").is_none());
        assert!(Platform::parse("").is_none());
    }

    #[test]
    fn test_platform_display() {
        assert_eq!(
            Platform::new(Os::Darwin, Arch::Arm64).to_string(),
            "darwin-arm64"
        );
        assert_eq!(
            Platform::new(Os::Windows, Arch::X86_64).to_string(),
            "windows-x86_64"
        );
    }

    #[test]
    fn test_platform_current() {
        let p = Platform::current();
        assert!(matches!(p.os, Os::Linux | Os::Darwin | Os::Windows));
        assert!(matches!(p.arch, Arch::Arm64 | Arch::X86_64));
    }

    #[test]
    fn test_os_parse() {
        assert_eq!(Os::parse("linux"), Some(Os::Linux));
        assert_eq!(Os::parse("darwin"), Some(Os::Darwin));
        assert_eq!(Os::parse("macos"), Some(Os::Darwin));
        assert_eq!(Os::parse("windows"), Some(Os::Windows));
        assert_eq!(Os::parse("win32"), Some(Os::Windows));
        assert_eq!(Os::parse("freebsd"), None);
    }

    #[test]
    fn test_os_family() {
        assert_eq!(Os::Linux.family(), OsFamily::Posix);
        assert_eq!(Os::Darwin.family(), OsFamily::Posix);
        assert_eq!(Os::Windows.family(), OsFamily::Windows);
    }

    #[test]
    fn test_arch_parse() {
        assert_eq!(Arch::parse("arm64"), Some(Arch::Arm64));
        assert_eq!(Arch::parse("aarch64"), Some(Arch::Arm64));
        assert_eq!(Arch::parse("x86_64"), Some(Arch::X86_64));
        assert_eq!(Arch::parse("amd64"), Some(Arch::X86_64));
        assert_eq!(Arch::parse("x64"), Some(Arch::X86_64));
        assert_eq!(Arch::parse("mips"), None);
    }

    #[test]
    fn test_layout_posix() {
        let config = config_with("/home/user", None);
        let layout = InstallLayout::resolve(&Platform::new(Os::Linux, Arch::X86_64), &config);
        assert_eq!(layout.install_dir, PathBuf::from("/home/user/.local/bin"));
        assert_eq!(layout.binary_name, "tombi");
        assert_eq!(
            layout.binary_path(),
            PathBuf::from("/home/user/.local/bin/tombi")
        );
    }

    #[test]
    fn test_layout_darwin_matches_linux() {
        let config = config_with("/Users/user", None);
        let layout = InstallLayout::resolve(&Platform::new(Os::Darwin, Arch::Arm64), &config);
        assert_eq!(layout.install_dir, PathBuf::from("/Users/user/.local/bin"));
        assert_eq!(layout.binary_name, "tombi");
    }

    #[test]
    fn test_layout_windows_local_app_data() {
        let config = config_with("C:/Users/user", Some("C:/Users/user/AppData/Local"));
        let layout = InstallLayout::resolve(&Platform::new(Os::Windows, Arch::Arm64), &config);
        assert_eq!(
            layout.install_dir,
            PathBuf::from("C:/Users/user/AppData/Local/tombi/bin")
        );
        assert_eq!(layout.binary_name, "tombi.exe");
    }

    #[test]
    fn test_layout_windows_fallback_without_local_app_data() {
        let config = config_with("C:/Users/user", None);
        let layout = InstallLayout::resolve(&Platform::new(Os::Windows, Arch::X86_64), &config);
        assert_eq!(
            layout.install_dir,
            PathBuf::from("C:/Users/user/.tombi/bin")
        );
    }
}
