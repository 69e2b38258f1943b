//! Checking an existing requirements file against the environment.

use std::cmp::Ordering;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::core::requirement::requirement_lines;
use crate::core::{ComparisonResult, InstalledVersion, PackageRequirement, PreqsError, Status};
use crate::ops::write::MANIFEST_FILE;
use crate::python::version::compare;
use crate::python::PackageIndex;
use crate::util::fs::{file_name_str, read_to_string};

/// Resolve the path given to `--check` to a requirements file.
///
/// A directory means its `requirements.txt`. The result must exist and be
/// named exactly `requirements.txt`.
pub fn resolve_requirements_path(path: &Path) -> Result<PathBuf, PreqsError> {
    let path = if path.is_dir() {
        path.join(MANIFEST_FILE)
    } else {
        path.to_path_buf()
    };

    if !path.exists() {
        return Err(PreqsError::RequirementsNotFound { path });
    }
    if file_name_str(&path) != Some(MANIFEST_FILE) {
        return Err(PreqsError::NotRequirementsFile { path });
    }
    Ok(path)
}

/// Parse the requirement lines of a manifest.
///
/// Lines without a recognizable operator are skipped with a warning.
pub fn parse_requirements(text: &str) -> Vec<PackageRequirement> {
    requirement_lines(text)
        .filter_map(|line| {
            let req = PackageRequirement::parse(line);
            if req.is_none() {
                tracing::warn!("skipping unrecognized requirement line: {}", line);
            }
            req
        })
        .collect()
}

/// Read and parse a requirements file.
pub fn read_requirements(path: &Path) -> Result<Vec<PackageRequirement>, PreqsError> {
    let text = read_to_string(path)
        .with_context(|| format!("failed to read requirements file: {}", path.display()))?;
    Ok(parse_requirements(&text))
}

/// Compare one requirement with what is installed.
pub fn compare_requirement(
    req: &PackageRequirement,
    index: &dyn PackageIndex,
) -> Result<ComparisonResult, PreqsError> {
    let installed = index
        .installed_version(&req.name)
        .with_context(|| format!("failed to look up installed version of `{}`", req.name))?;

    let status = match &installed {
        InstalledVersion::NotInstalled => Status::NotInstalled,
        InstalledVersion::Found(version) => match compare(&req.name, version, &req.version)? {
            Ordering::Equal => Status::Same,
            Ordering::Less => Status::Older,
            Ordering::Greater => Status::Newer,
        },
    };

    Ok(ComparisonResult {
        package: req.name.clone(),
        required: req.version.clone(),
        installed,
        status,
    })
}

/// Check every requirement in the file at `path`, in file order.
///
/// `path` may be the file itself or the directory holding it.
pub fn check(path: &Path, index: &dyn PackageIndex) -> Result<Vec<ComparisonResult>, PreqsError> {
    let path = resolve_requirements_path(path)?;
    tracing::debug!("Checking {}", path.display());

    read_requirements(&path)?
        .iter()
        .map(|req| compare_requirement(req, index))
        .collect()
}

/// Render the check results as a fixed-width table.
pub fn format_report(results: &[ComparisonResult]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:25}{:15}{:15}{}",
        "Name", "Requirement", "Installed", "Status"
    );
    out.push_str(&"-".repeat(65));
    out.push('\n');
    for result in results {
        let _ = writeln!(
            out,
            "{:25}{:15}{:15}{}",
            result.package,
            result.required,
            result.installed.check_display(),
            result.status
        );
    }
    out
}
