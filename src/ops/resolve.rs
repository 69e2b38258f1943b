//! Installed version lookup for external packages.

use std::collections::BTreeSet;

use anyhow::Context;

use crate::core::{PreqsError, ResolvedPackage};
use crate::python::PackageIndex;

/// Look up the installed version of every package, in name order.
///
/// Packages that are not installed are kept, marked as such; the writer
/// decides what to do with them.
pub fn resolve_versions(
    packages: &BTreeSet<String>,
    index: &dyn PackageIndex,
) -> Result<Vec<ResolvedPackage>, PreqsError> {
    let mut resolved = Vec::with_capacity(packages.len());
    for name in packages {
        let version = index
            .installed_version(name)
            .with_context(|| format!("failed to look up installed version of `{}`", name))?;
        tracing::debug!("{}: {}", name, version);
        resolved.push(ResolvedPackage::new(name.clone(), version));
    }
    Ok(resolved)
}
