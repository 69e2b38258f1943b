//! Test utilities and mocks for preqs unit tests.
//!
//! The pipeline reaches the Python runtime only through [`StdlibSource`]
//! and [`PackageIndex`]; the types here implement both over fixed data so
//! tests never need an interpreter.

pub mod fixtures;

use std::collections::{BTreeMap, BTreeSet};

use anyhow::{bail, Result};

use crate::core::InstalledVersion;
use crate::python::{PackageIndex, StdlibSource};

pub use fixtures::*;

/// A small, fixed standard library.
pub fn stdlib() -> BTreeSet<String> {
    [
        "abc",
        "argparse",
        "collections",
        "datetime",
        "functools",
        "json",
        "logging",
        "os",
        "pathlib",
        "re",
        "subprocess",
        "sys",
        "typing",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// A standard library source over a fixed name set.
#[derive(Debug, Clone, Default)]
pub struct FixedStdlib {
    names: BTreeSet<String>,
}

impl FixedStdlib {
    pub fn new(names: BTreeSet<String>) -> Self {
        FixedStdlib { names }
    }
}

impl StdlibSource for FixedStdlib {
    fn stdlib_names(&self) -> Result<BTreeSet<String>> {
        Ok(self.names.clone())
    }
}

/// An in-memory package index.
#[derive(Debug, Clone, Default)]
pub struct MockPackageIndex {
    installed: BTreeMap<String, String>,
    fail: bool,
}

impl MockPackageIndex {
    /// An environment with nothing installed.
    pub fn new() -> Self {
        MockPackageIndex::default()
    }

    /// Mark `name` as installed at `version`.
    pub fn with(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.installed.insert(name.into(), version.into());
        self
    }

    /// An index whose every lookup fails.
    pub fn failing() -> Self {
        MockPackageIndex {
            installed: BTreeMap::new(),
            fail: true,
        }
    }
}

impl PackageIndex for MockPackageIndex {
    fn installed_version(&self, name: &str) -> Result<InstalledVersion> {
        if self.fail {
            bail!("package metadata unavailable");
        }
        Ok(self
            .installed
            .get(name)
            .map_or(InstalledVersion::NotInstalled, InstalledVersion::found))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_index() {
        let index = MockPackageIndex::new().with("six", "1.17.0");
        assert_eq!(
            index.installed_version("six").unwrap(),
            InstalledVersion::found("1.17.0")
        );
        assert_eq!(
            index.installed_version("numpy").unwrap(),
            InstalledVersion::NotInstalled
        );
        assert!(MockPackageIndex::failing().installed_version("six").is_err());
    }

    #[test]
    fn test_fixture_root_is_canonical() {
        let project = ProjectFixture::new().file("pkg/mod.py", "import os\n").build();
        assert_eq!(project.root(), project.root().canonicalize().unwrap());
        assert_eq!(project.files().len(), 1);
    }
}
