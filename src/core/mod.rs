//! Core data model: requirements, installed versions, errors and exit codes.

pub mod error;
pub mod exit_code;
pub mod installed;
pub mod requirement;

pub use error::PreqsError;
pub use exit_code::ExitCode;
pub use installed::{InstalledVersion, ResolvedPackage};
pub use requirement::{ComparisonResult, PackageRequirement, Status};

/// The first segment of a dotted import path (`a.b.c` -> `a`).
pub fn top_level_name(import: &str) -> &str {
    import.split('.').next().unwrap_or(import)
}
