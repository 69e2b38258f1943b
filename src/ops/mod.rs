//! High-level operations.
//!
//! Each pipeline stage lives in its own module; [`generate`] and [`check`]
//! wire them into the two commands preqs offers.

pub mod check;
pub mod classify;
pub mod generate;
pub mod resolve;
pub mod scan;
pub mod write;

pub use check::{check, format_report};
pub use classify::{external_imports, local_names};
pub use generate::{generate, GenerateOptions, GenerateReport};
pub use resolve::resolve_versions;
pub use scan::{collect_imports, find_files, ScanOptions};
pub use write::{render_listing, render_manifest, write_manifest, MANIFEST_FILE};
