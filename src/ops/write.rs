//! Rendering, writing and verifying the requirements file.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use chrono::{DateTime, FixedOffset, Local};

use crate::core::{PreqsError, ResolvedPackage};
use crate::util::fs::{read_to_string, write_string};
use crate::util::hash::{sha256_file, sha256_str};

/// Name of the manifest written to, and checked at, the project root.
pub const MANIFEST_FILE: &str = "requirements.txt";

/// Tool name recorded in the generated-by line.
pub const TOOL_NAME: &str = "preqs";

/// Path of the manifest for a project root.
pub fn manifest_path(root: &Path) -> PathBuf {
    root.join(MANIFEST_FILE)
}

/// Refuse to run when a manifest exists and would be overwritten.
///
/// Called before scanning so nothing is done that would be thrown away.
pub fn ensure_writable(path: &Path, replace: bool, print: bool) -> Result<(), PreqsError> {
    if !path.exists() || replace || print {
        return Ok(());
    }
    Err(PreqsError::ManifestExists {
        path: path.to_path_buf(),
    })
}

/// The trailing `# Generated by:` line.
pub fn generated_by(now: &DateTime<FixedOffset>) -> String {
    format!(
        "# Generated by: {} v{} ({})",
        TOOL_NAME,
        env!("CARGO_PKG_VERSION"),
        now.format("%Y-%m-%dT%H:%M:%S%.6f%:z")
    )
}

/// The generated-by line for the current local time.
pub fn generated_by_now() -> String {
    generated_by(&Local::now().fixed_offset())
}

fn sorted(packages: &[ResolvedPackage]) -> Vec<&ResolvedPackage> {
    let mut sorted: Vec<_> = packages.iter().collect();
    sorted.sort();
    sorted
}

/// Render the manifest: one `name==version` line per installed package,
/// sorted by name, then a blank line and the generated-by line.
///
/// Packages that are not installed are left out.
pub fn render_manifest(packages: &[ResolvedPackage], generated_by: &str) -> String {
    let lines: Vec<String> = sorted(packages)
        .into_iter()
        .filter_map(|pkg| {
            pkg.version
                .as_version()
                .map(|version| format!("{}=={}", pkg.name, version))
        })
        .collect();

    format!("{}\n\n{}\n", lines.join("\n"), generated_by)
}

/// Render the print-mode listing. Every package appears, installed or not.
pub fn render_listing(packages: &[ResolvedPackage]) -> String {
    let mut out = String::new();
    out.push_str("\nThe following requirements were captured:\n");
    out.push_str(&"-".repeat(42));
    out.push('\n');
    for pkg in sorted(packages) {
        let _ = writeln!(out, "{:25}{}", pkg.name, pkg.version.generate_display());
    }
    out
}

/// Write `content` to `path`, replacing any existing file, then verify the
/// file reads back with the same checksum.
pub fn write_manifest(path: &Path, content: &str) -> Result<(), PreqsError> {
    write_string(path, content)?;
    verify_written(path, content)
}

/// Compare the checksum of `content` with that of the file at `path`.
pub fn verify_written(path: &Path, content: &str) -> Result<(), PreqsError> {
    let expected = sha256_str(content);
    let actual = sha256_file(path)?;

    if expected != actual {
        tracing::debug!(
            "Written content differs:\n{}",
            read_to_string(path).unwrap_or_default()
        );
        return Err(PreqsError::WriteVerification {
            path: path.to_path_buf(),
            expected,
            actual,
        });
    }

    tracing::debug!("Verified {} (sha256 {})", path.display(), &actual[..16]);
    Ok(())
}
