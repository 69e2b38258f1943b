//! Installed package versions.

use std::fmt;

/// Text shown for a missing package in generated listings.
pub const NOT_INSTALLED_GENERATE: &str = "Unknown or not installed";

/// Text shown for a missing package in the check table's `Installed` column.
pub const NOT_INSTALLED_CHECK: &str = "n/a";

/// The version of a package in the runtime environment.
///
/// Absence is a variant rather than a magic string. The two surfaces that
/// display it use different text, see [`InstalledVersion::generate_display`]
/// and [`InstalledVersion::check_display`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum InstalledVersion {
    /// The package is installed at this version.
    Found(String),
    /// No distribution with this name is installed.
    NotInstalled,
}

impl InstalledVersion {
    pub fn found(version: impl Into<String>) -> Self {
        InstalledVersion::Found(version.into())
    }

    /// The version string, if installed.
    pub fn as_version(&self) -> Option<&str> {
        match self {
            InstalledVersion::Found(v) => Some(v),
            InstalledVersion::NotInstalled => None,
        }
    }

    /// Rendering used by manifest generation and print mode.
    pub fn generate_display(&self) -> &str {
        self.as_version().unwrap_or(NOT_INSTALLED_GENERATE)
    }

    /// Rendering used by the check report.
    pub fn check_display(&self) -> &str {
        self.as_version().unwrap_or(NOT_INSTALLED_CHECK)
    }
}

impl fmt::Display for InstalledVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.generate_display())
    }
}

/// A package name paired with its installed version.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResolvedPackage {
    pub name: String,
    pub version: InstalledVersion,
}

impl ResolvedPackage {
    pub fn new(name: impl Into<String>, version: InstalledVersion) -> Self {
        ResolvedPackage {
            name: name.into(),
            version,
        }
    }
}
