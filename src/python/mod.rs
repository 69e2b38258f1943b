//! The Python side of preqs: source parsing and the runtime environment.
//!
//! The standard library list and installed-package metadata come from the
//! environment rather than being hardcoded. Both sit behind traits so the
//! classifier and resolver can run against fixed data in tests.

pub mod environment;
pub mod imports;
pub mod interpreter;
pub mod metadata;
pub mod version;

use std::collections::BTreeSet;

use anyhow::Result;

use crate::core::InstalledVersion;

pub use environment::PythonEnvironment;
pub use imports::extract_imports;
pub use metadata::SitePackages;

/// Supplies the standard library module names of a Python runtime.
pub trait StdlibSource {
    fn stdlib_names(&self) -> Result<BTreeSet<String>>;
}

/// Answers "which version of this package is installed?".
///
/// An absent package is `Ok(InstalledVersion::NotInstalled)`; `Err` is
/// reserved for failures to query the environment at all.
pub trait PackageIndex {
    fn installed_version(&self, name: &str) -> Result<InstalledVersion>;
}
