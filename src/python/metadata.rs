//! Installed distribution metadata.
//!
//! Installed distributions leave a metadata record next to their code:
//! `<name>-<version>.dist-info/METADATA` for wheels, and
//! `<name>.egg-info/PKG-INFO` (or a bare `<name>.egg-info` file) for
//! older installs. Both are RFC 822 style headers; `Name` and `Version`
//! are all preqs reads.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::InstalledVersion;
use crate::python::PackageIndex;
use crate::util::fs::file_name_str;

/// Normalize a distribution name (PEP 503): lowercase, with runs of
/// `-`, `_` and `.` collapsed to a single `-`.
pub fn normalize_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut in_separator = false;
    for c in name.trim().chars() {
        if matches!(c, '-' | '_' | '.') {
            if !in_separator {
                out.push('-');
            }
            in_separator = true;
        } else {
            out.extend(c.to_lowercase());
            in_separator = false;
        }
    }
    out
}

/// `Name` and `Version` headers from a metadata document.
fn parse_metadata(text: &str) -> Option<(String, String)> {
    let mut name = None;
    let mut version = None;
    for line in text.lines() {
        // Headers end at the first blank line; the body is the description.
        if line.trim().is_empty() {
            break;
        }
        if let Some((key, value)) = line.split_once(':') {
            match key.trim().to_ascii_lowercase().as_str() {
                "name" if name.is_none() => name = Some(value.trim().to_string()),
                "version" if version.is_none() => version = Some(value.trim().to_string()),
                _ => {}
            }
        }
    }
    match (name, version) {
        (Some(n), Some(v)) if !n.is_empty() && !v.is_empty() => Some((n, v)),
        _ => None,
    }
}

/// The metadata file of an entry in a search directory, if it is one.
fn metadata_file(entry: &Path) -> Option<PathBuf> {
    let name = file_name_str(entry)?;
    if name.ends_with(".dist-info") {
        Some(entry.join("METADATA"))
    } else if name.ends_with(".egg-info") {
        if entry.is_dir() {
            Some(entry.join("PKG-INFO"))
        } else {
            Some(entry.to_path_buf())
        }
    } else {
        None
    }
}

/// An index of the distributions installed in a set of directories.
#[derive(Debug, Clone, Default)]
pub struct SitePackages {
    /// Normalized name -> version.
    versions: HashMap<String, String>,
}

impl SitePackages {
    /// Index every distribution found directly inside `dirs`.
    ///
    /// Directories are searched in order and the first distribution found
    /// for a name wins, matching import precedence. Missing directories and
    /// unreadable records are skipped.
    pub fn scan<P: AsRef<Path>>(dirs: &[P]) -> Result<Self> {
        let mut versions = HashMap::new();

        for dir in dirs {
            let dir = dir.as_ref();
            if !dir.is_dir() {
                continue;
            }

            let mut entries: Vec<PathBuf> = fs::read_dir(dir)
                .with_context(|| format!("failed to read directory: {}", dir.display()))?
                .filter_map(|e| e.ok().map(|e| e.path()))
                .collect();
            entries.sort();

            for entry in entries {
                let Some(meta_path) = metadata_file(&entry) else {
                    continue;
                };
                let Ok(text) = fs::read_to_string(&meta_path) else {
                    tracing::debug!("Skipping unreadable metadata: {}", meta_path.display());
                    continue;
                };
                if let Some((name, version)) = parse_metadata(&text) {
                    versions.entry(normalize_name(&name)).or_insert(version);
                }
            }
        }

        tracing::debug!("Indexed {} installed distributions", versions.len());
        Ok(SitePackages { versions })
    }

    /// Look up the installed version of `name`.
    pub fn lookup(&self, name: &str) -> InstalledVersion {
        match self.versions.get(&normalize_name(name)) {
            Some(version) => InstalledVersion::found(version.clone()),
            None => InstalledVersion::NotInstalled,
        }
    }
}

impl PackageIndex for SitePackages {
    fn installed_version(&self, name: &str) -> Result<InstalledVersion> {
        Ok(self.lookup(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn dist_info(dir: &Path, name: &str, version: &str) {
        let info = dir.join(format!("{}-{}.dist-info", name.replace('-', "_"), version));
        fs::create_dir_all(&info).unwrap();
        fs::write(
            info.join("METADATA"),
            format!(
                "Metadata-Version: 2.1\nName: {name}\nVersion: {version}\nSummary: test\n\nName: ignored\n"
            ),
        )
        .unwrap();
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("Requests"), "requests");
        assert_eq!(normalize_name("typing_extensions"), "typing-extensions");
        assert_eq!(normalize_name("zope.interface"), "zope-interface");
        assert_eq!(normalize_name("a__-.b"), "a-b");
    }

    #[test]
    fn test_parse_metadata_stops_at_body() {
        let text = "Name: six\nVersion: 1.17.0\n\nVersion: 9.9.9\n";
        assert_eq!(
            parse_metadata(text),
            Some(("six".to_string(), "1.17.0".to_string()))
        );
        assert_eq!(parse_metadata("Name: six\n"), None);
    }

    #[test]
    fn test_scan_dist_info() {
        let tmp = TempDir::new().unwrap();
        dist_info(tmp.path(), "six", "1.17.0");
        dist_info(tmp.path(), "typing-extensions", "4.12.2");

        let index = SitePackages::scan(&[tmp.path()]).unwrap();
        assert_eq!(index.versions.len(), 2);
        assert_eq!(index.lookup("six"), InstalledVersion::found("1.17.0"));
        assert_eq!(
            index.lookup("typing_extensions"),
            InstalledVersion::found("4.12.2")
        );
        assert_eq!(index.lookup("numpy"), InstalledVersion::NotInstalled);
    }

    #[test]
    fn test_scan_egg_info_file_and_dir() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("legacy-0.1.egg-info"),
            "Metadata-Version: 1.0\nName: legacy\nVersion: 0.1\n",
        )
        .unwrap();
        let egg_dir = tmp.path().join("older.egg-info");
        fs::create_dir_all(&egg_dir).unwrap();
        fs::write(egg_dir.join("PKG-INFO"), "Name: older\nVersion: 2.0\n").unwrap();

        let index = SitePackages::scan(&[tmp.path()]).unwrap();
        assert_eq!(index.lookup("legacy"), InstalledVersion::found("0.1"));
        assert_eq!(index.lookup("older"), InstalledVersion::found("2.0"));
    }

    #[test]
    fn test_first_directory_wins() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        dist_info(first.path(), "six", "1.17.0");
        dist_info(second.path(), "six", "1.16.0");

        let index = SitePackages::scan(&[first.path(), second.path()]).unwrap();
        assert_eq!(index.lookup("six"), InstalledVersion::found("1.17.0"));
    }

    #[test]
    fn test_missing_directories_are_skipped() {
        let tmp = TempDir::new().unwrap();
        let index = SitePackages::scan(&[tmp.path().join("nope")]).unwrap();
        assert!(index.versions.is_empty());
    }

    #[test]
    fn test_broken_dist_info_is_skipped() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("broken-1.0.dist-info")).unwrap();
        dist_info(tmp.path(), "six", "1.17.0");

        let index = SitePackages::scan(&[tmp.path()]).unwrap();
        assert_eq!(index.versions.len(), 1);
        assert_eq!(index.lookup("broken"), InstalledVersion::NotInstalled);
    }
}
