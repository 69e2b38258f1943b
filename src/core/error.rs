//! Error types for the generation and check pipelines.

use std::path::PathBuf;

use thiserror::Error;

use crate::core::exit_code::ExitCode;
use crate::python::version::VersionError;
use crate::util::diagnostic::{suggestions, Diagnostic, SyntaxError};

/// A failure that stops a pipeline.
#[derive(Debug, Error)]
pub enum PreqsError {
    #[error("requirements file already exists: {}", path.display())]
    ManifestExists { path: PathBuf },

    #[error("no Python modules found in {}", root.display())]
    NoSourceFiles { root: PathBuf },

    #[error("no imports found for this project")]
    NoImports { root: PathBuf },

    #[error("local or standard library modules remain after cleaning: {}", leaked.join(", "))]
    Classification { leaked: Vec<String> },

    #[error(transparent)]
    Version(#[from] VersionError),

    #[error("requirements file failed write verification: {}", path.display())]
    WriteVerification {
        path: PathBuf,
        expected: String,
        actual: String,
    },

    #[error("invalid path `{path}`: path cannot contain `..`")]
    InvalidPath { path: String },

    #[error("file not found: {}", path.display())]
    RequirementsNotFound { path: PathBuf },

    #[error("file must be a requirements.txt file: {}", path.display())]
    NotRequirementsFile { path: PathBuf },

    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl PreqsError {
    /// The process exit code for this failure.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            PreqsError::ManifestExists { .. } => ExitCode::ManifestExists,
            PreqsError::NoSourceFiles { .. } => ExitCode::NoFiles,
            PreqsError::NoImports { .. } => ExitCode::NoImports,
            PreqsError::Classification { .. } => ExitCode::Classification,
            PreqsError::Version(_) => ExitCode::Version,
            PreqsError::WriteVerification { .. } => ExitCode::Write,
            PreqsError::InvalidPath { .. } => ExitCode::InvalidPath,
            PreqsError::RequirementsNotFound { .. } => ExitCode::RequirementsNotFound,
            PreqsError::NotRequirementsFile { .. } => ExitCode::NotRequirementsFile,
            PreqsError::Syntax(_) | PreqsError::Unexpected(_) => ExitCode::Internal,
        }
    }

    /// Environment outcomes are reported as warnings; everything else is an error.
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            PreqsError::ManifestExists { .. }
                | PreqsError::NoSourceFiles { .. }
                | PreqsError::NoImports { .. }
        )
    }

    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            PreqsError::ManifestExists { path } => {
                Diagnostic::warning("the following path already exists, aborting")
                    .with_location(path)
                    .with_suggestion(suggestions::REPLACE_EXISTING)
                    .with_suggestion(suggestions::PRINT_ONLY)
            }

            PreqsError::NoSourceFiles { root } => {
                Diagnostic::warning("no Python modules found in this project")
                    .with_location(root)
                    .with_suggestion(suggestions::CHECK_IGNORE_DIRS)
            }

            PreqsError::NoImports { root } => {
                Diagnostic::warning("no imports found for this project").with_location(root)
            }

            PreqsError::Classification { leaked } => {
                Diagnostic::error("internal error: import classification is inconsistent")
                    .with_context(format!("still present: {}", leaked.join(", ")))
                    .with_suggestion(suggestions::REPORT_BUG)
            }

            PreqsError::Version(err) => Diagnostic::error(err.to_string())
                .with_context("versions must follow a major.minor.patch-like scheme"),

            PreqsError::WriteVerification {
                path,
                expected,
                actual,
            } => Diagnostic::error("requirements file does not match what was written")
                .with_location(path)
                .with_context(format!("expected checksum: {}", expected))
                .with_context(format!("on-disk checksum: {}", actual))
                .with_suggestion(suggestions::CHECK_DISK),

            PreqsError::InvalidPath { path } => {
                Diagnostic::error(format!("invalid path detected: `{}`", path))
                    .with_context("path cannot contain `..`")
            }

            PreqsError::RequirementsNotFound { path } => {
                Diagnostic::error("requirements file not found").with_location(path)
            }

            PreqsError::NotRequirementsFile { path } => {
                Diagnostic::error("file must be a requirements.txt file").with_location(path)
            }

            PreqsError::Syntax(err) => Diagnostic::error(err.to_string())
                .with_location(&err.path)
                .with_context("processing aborted"),

            PreqsError::Unexpected(err) => {
                let mut diag = Diagnostic::error(err.to_string());
                for cause in err.chain().skip(1) {
                    diag = diag.with_context(cause.to_string());
                }
                diag.with_context("processing aborted")
            }
        }
    }
}
