//! Process exit codes.

use std::fmt;

/// Exit status reported by the `preqs` binary.
///
/// Each pipeline failure maps to exactly one code, so callers (CI scripts,
/// wrappers) can tell the outcomes apart without parsing output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExitCode {
    /// Completed successfully.
    Ok,
    /// `requirements.txt` already exists and neither replace nor print mode is set.
    ManifestExists,
    /// No matching source files under the root.
    NoFiles,
    /// Source files were found, but none import anything.
    NoImports,
    /// Local or standard-library names survived classification.
    Classification,
    /// A version string could not be ordered.
    Version,
    /// The written manifest did not read back identically.
    Write,
    /// The PATH argument was rejected.
    InvalidPath,
    /// Checker: the requirements file does not exist.
    RequirementsNotFound,
    /// Checker: the path does not name a `requirements.txt` file.
    NotRequirementsFile,
    /// Uninitialized state or an unexpected error.
    Internal,
}

impl ExitCode {
    /// Numeric process exit status.
    pub fn code(self) -> i32 {
        match self {
            ExitCode::Ok => 0,
            ExitCode::ManifestExists => 10,
            ExitCode::NoFiles => 20,
            ExitCode::NoImports => 30,
            ExitCode::Classification => 40,
            ExitCode::Version => 50,
            ExitCode::Write => 60,
            ExitCode::InvalidPath => 100,
            ExitCode::RequirementsNotFound => 201,
            ExitCode::NotRequirementsFile => 202,
            ExitCode::Internal => 255,
        }
    }

    pub fn is_success(self) -> bool {
        self == ExitCode::Ok
    }
}

impl Default for ExitCode {
    /// Nothing has run yet, so nothing has succeeded.
    fn default() -> Self {
        ExitCode::Internal
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
