//! preqs - generate and check `requirements.txt` files for Python projects
//!
//! This crate provides the library side of preqs: scanning a project for
//! import statements, separating external packages from the standard
//! library and the project's own modules, looking up installed versions,
//! and writing or checking the resulting manifest.

pub mod core;
pub mod ops;
pub mod python;
pub mod util;

/// Test utilities and mocks for preqs unit tests.
///
/// Only compiled for tests. Provides in-memory standard library and
/// package index implementations and on-disk project fixtures.
#[cfg(test)]
pub mod test_support;

pub use crate::core::{
    ComparisonResult, ExitCode, InstalledVersion, PackageRequirement, PreqsError,
    ResolvedPackage, Status,
};
pub use crate::python::{PackageIndex, PythonEnvironment, StdlibSource};
