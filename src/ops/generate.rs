//! The requirements generation pipeline.
//!
//! Stages run in order and each runs only if the one before it succeeded:
//!
//! 1. refuse to overwrite an existing manifest (unless replacing or printing)
//! 2. find module files
//! 3. collect their imports
//! 4. drop standard-library and local names
//! 5. look up installed versions
//! 6. write and verify the manifest, or render the listing
//!
//! The first failing stage stops the run. Finalization always runs and
//! logs the outcome; the caller turns the report into an exit status.

use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::core::{ExitCode, PreqsError, ResolvedPackage};
use crate::ops::classify::external_imports;
use crate::ops::resolve::resolve_versions;
use crate::ops::scan::{collect_imports, find_files, ScanOptions};
use crate::ops::write::{
    ensure_writable, generated_by_now, manifest_path, render_listing, render_manifest,
    write_manifest,
};
use crate::python::{PackageIndex, StdlibSource};

/// Options for a generation run.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub scan: ScanOptions,

    /// Render the requirements instead of writing them.
    pub print: bool,

    /// Overwrite an existing `requirements.txt`.
    pub replace: bool,
}

impl GenerateOptions {
    pub fn new(scan: ScanOptions) -> Self {
        GenerateOptions {
            scan,
            print: false,
            replace: false,
        }
    }
}

/// Everything a generation run produced, up to the stage where it stopped.
#[derive(Debug, Default)]
pub struct GenerateReport {
    pub files: BTreeSet<PathBuf>,
    pub imports: BTreeSet<String>,
    pub requirements: Vec<ResolvedPackage>,

    /// Path of the manifest, once written and verified.
    pub written: Option<PathBuf>,

    /// Print-mode listing.
    pub listing: Option<String>,

    /// The failure that stopped the run, if any.
    pub error: Option<PreqsError>,
}

impl GenerateReport {
    pub fn exit_code(&self) -> ExitCode {
        self.error
            .as_ref()
            .map_or(ExitCode::Ok, PreqsError::exit_code)
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Run the generation pipeline.
pub fn generate(
    opts: &GenerateOptions,
    stdlib: &dyn StdlibSource,
    index: &dyn PackageIndex,
) -> GenerateReport {
    let mut report = GenerateReport::default();
    if let Err(err) = run_stages(opts, stdlib, index, &mut report) {
        report.error = Some(err);
    }
    finalize(&report);
    report
}

fn run_stages(
    opts: &GenerateOptions,
    stdlib: &dyn StdlibSource,
    index: &dyn PackageIndex,
    report: &mut GenerateReport,
) -> Result<(), PreqsError> {
    let root = &opts.scan.root;
    let manifest = manifest_path(root);
    ensure_writable(&manifest, opts.replace, opts.print)?;

    tracing::debug!("Starting up ...");
    tracing::debug!(
        "Ignoring the following directories:{}",
        opts.scan
            .ignore_dirs
            .iter()
            .map(|d| format!("\n\t - {}", d))
            .collect::<String>()
    );

    report.files = find_files(&opts.scan)?;

    report.imports = collect_imports(&report.files)?;
    if report.imports.is_empty() {
        return Err(PreqsError::NoImports { root: root.clone() });
    }

    let stdlib = stdlib.stdlib_names()?;
    let external = external_imports(&report.imports, &report.files, &stdlib)?;

    report.requirements = resolve_versions(&external, index)?;

    if opts.print {
        report.listing = Some(render_listing(&report.requirements));
    } else {
        let content = render_manifest(&report.requirements, &generated_by_now());
        write_manifest(&manifest, &content)?;
        report.written = Some(manifest);
    }
    Ok(())
}

fn finalize(report: &GenerateReport) {
    tracing::debug!("All imports being reported: {:?}", report.imports);
    tracing::debug!(
        "All requirements being reported: {:?}",
        report
            .requirements
            .iter()
            .map(|r| (r.name.as_str(), r.version.generate_display()))
            .collect::<Vec<_>>()
    );

    match (&report.error, &report.written) {
        (None, Some(path)) => {
            tracing::info!(
                "The requirements file has been written here:\n- {}",
                path.display()
            );
        }
        (None, None) => {}
        (Some(err), _) if err.is_warning() => tracing::debug!("Stopped early: {}", err),
        (Some(err), _) => tracing::debug!(
            "An error occurred while processing. Exit code: {}",
            err.exit_code().code()
        ),
    }
}
