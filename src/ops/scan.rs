//! Project scanning: finding module files and collecting their imports.

use std::collections::BTreeSet;
use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

use anyhow::Context;
use glob::Pattern;
use walkdir::{DirEntry, WalkDir};

use crate::core::{top_level_name, PreqsError};
use crate::python::extract_imports;
use crate::util::fs::normalize_path;

/// File name patterns scanned by default.
pub const DEFAULT_PATTERNS: &[&str] = &["*.py", "*.pyw"];

/// Directories never scanned by default.
pub const DEFAULT_IGNORE_DIRS: &[&str] = &[
    ".ipynb_checkpoints",
    ".git",
    ".svn",
    ".tox",
    "test",
    "tests",
    "__pycache__",
];

/// What to scan.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Project root; every file found lives below it.
    pub root: PathBuf,

    /// File name patterns, e.g. `*.py`.
    pub patterns: Vec<String>,

    /// Directories to skip.
    ///
    /// A bare name (`tests`) skips every directory with that name below the
    /// root. A path (`docs/build`, `/abs/path`) skips that one directory;
    /// relative paths are taken from the root.
    pub ignore_dirs: Vec<String>,
}

impl ScanOptions {
    /// Options with the default patterns and ignore list.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        ScanOptions {
            root: root.into(),
            patterns: DEFAULT_PATTERNS.iter().map(|s| s.to_string()).collect(),
            ignore_dirs: DEFAULT_IGNORE_DIRS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Add directories to the ignore list.
    pub fn with_ignore_dirs<I, S>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for dir in dirs {
            let dir = dir.into();
            if !self.ignore_dirs.contains(&dir) {
                self.ignore_dirs.push(dir);
            }
        }
        self
    }

    /// Replace the file patterns. An empty list keeps the current ones.
    pub fn with_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let patterns: Vec<String> = patterns.into_iter().map(Into::into).collect();
        if !patterns.is_empty() {
            self.patterns = patterns;
        }
        self
    }
}

/// A compiled ignore-list entry.
#[derive(Debug, Clone, PartialEq, Eq)]
enum IgnoreRule {
    /// Any directory with this name.
    Segment(OsString),
    /// This directory and everything below it.
    Prefix(PathBuf),
}

impl IgnoreRule {
    fn new(root: &Path, entry: &str) -> Option<Self> {
        let path = Path::new(entry);
        let normal: Vec<_> = path
            .components()
            .filter(|c| matches!(c, Component::Normal(_)))
            .collect();

        if path.is_absolute() {
            Some(IgnoreRule::Prefix(normalize_path(path)))
        } else if normal.len() == 1 && path.components().count() == 1 {
            Some(IgnoreRule::Segment(normal[0].as_os_str().to_os_string()))
        } else if normal.is_empty() {
            None
        } else {
            Some(IgnoreRule::Prefix(normalize_path(&root.join(path))))
        }
    }

    fn matches(&self, dir: &Path) -> bool {
        match self {
            IgnoreRule::Segment(name) => dir.file_name() == Some(name.as_os_str()),
            IgnoreRule::Prefix(prefix) => dir.starts_with(prefix),
        }
    }
}

/// Recursively find files under `opts.root` matching `opts.patterns`,
/// skipping ignored directories.
///
/// Matching is per path component, so ignoring `test` does not skip
/// `testing`. Hidden files and directories are included.
pub fn find_files(opts: &ScanOptions) -> Result<BTreeSet<PathBuf>, PreqsError> {
    tracing::debug!("Starting module file collection ...");

    let patterns = opts
        .patterns
        .iter()
        .map(|p| Pattern::new(p).with_context(|| format!("invalid file pattern: {}", p)))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let rules: Vec<IgnoreRule> = opts
        .ignore_dirs
        .iter()
        .filter_map(|entry| IgnoreRule::new(&opts.root, entry))
        .collect();

    let is_ignored = |entry: &DirEntry| {
        entry.depth() > 0
            && entry.file_type().is_dir()
            && rules.iter().any(|rule| rule.matches(entry.path()))
    };

    let mut files = BTreeSet::new();
    for entry in WalkDir::new(&opts.root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_ignored(e))
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("skipping unreadable path: {}", e);
                continue;
            }
        };

        if !entry.path().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if patterns.iter().any(|p| p.matches(&name)) {
            files.insert(entry.into_path());
        }
    }

    tracing::debug!(
        "Module files found:{}",
        files
            .iter()
            .map(|f| format!("\n\t - {}", f.display()))
            .collect::<String>()
    );

    if files.is_empty() {
        return Err(PreqsError::NoSourceFiles {
            root: opts.root.clone(),
        });
    }
    Ok(files)
}

/// Extract and merge the imports of every file, reduced to top-level names
/// (`a.b.c` becomes `a`).
///
/// A file that fails to parse aborts the whole collection.
pub fn collect_imports(files: &BTreeSet<PathBuf>) -> Result<BTreeSet<String>, PreqsError> {
    tracing::debug!(
        "Starting import statement extraction on {} files ...",
        files.len()
    );

    let mut imports = BTreeSet::new();
    for file in files {
        tracing::debug!(
            "Reading file: {}",
            file.file_name().unwrap_or_default().to_string_lossy()
        );
        let found = extract_imports(file)?;
        if found.is_empty() {
            tracing::debug!("- Found imports: None");
        } else {
            tracing::debug!("- Found imports: {:?}", found);
        }
        imports.extend(
            found
                .iter()
                .map(|name| top_level_name(name))
                .filter(|name| !name.is_empty())
                .map(str::to_string),
        );
    }

    Ok(imports)
}
