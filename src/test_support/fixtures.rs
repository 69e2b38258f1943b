//! On-disk project fixtures.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::ops::scan::{find_files, ScanOptions};

/// Builder for a throwaway Python project.
///
/// ```rust,ignore
/// let project = ProjectFixture::new()
///     .file("main.py", "import requests\n")
///     .file("mypkg/__init__.py", "")
///     .build();
/// ```
#[derive(Debug, Clone, Default)]
pub struct ProjectFixture {
    /// Files to create (path relative to the project root -> content).
    files: Vec<(PathBuf, String)>,
}

impl ProjectFixture {
    pub fn new() -> Self {
        ProjectFixture::default()
    }

    /// Add a file. Parent directories are created on build.
    pub fn file(mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.files.push((path.into(), content.into()));
        self
    }

    /// Write the project into a fresh temporary directory.
    pub fn build(self) -> Project {
        let tmp = TempDir::new().expect("failed to create temp dir");
        let root = tmp
            .path()
            .canonicalize()
            .expect("failed to canonicalize temp dir");

        for (rel_path, content) in &self.files {
            let full_path = root.join(rel_path);
            if let Some(parent) = full_path.parent() {
                std::fs::create_dir_all(parent).expect("failed to create fixture dir");
            }
            std::fs::write(&full_path, content).expect("failed to write fixture file");
        }

        Project { _tmp: tmp, root }
    }
}

/// A project written to disk. Dropping it removes the directory.
#[derive(Debug)]
pub struct Project {
    _tmp: TempDir,
    root: PathBuf,
}

impl Project {
    /// Canonical project root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The module files a default scan of the project finds.
    pub fn files(&self) -> BTreeSet<PathBuf> {
        find_files(&ScanOptions::new(&self.root)).expect("fixture has no module files")
    }
}
