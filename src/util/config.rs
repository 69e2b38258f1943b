//! Configuration file support for preqs.
//!
//! preqs reads two optional configuration files:
//! - Global: `~/.preqs/config.toml` - User-wide defaults
//! - Project: `<root>/.preqs.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config, and command-line
//! arguments are applied on top of both.
//!
//! ```toml
//! [scan]
//! ignore_dirs = ["build", "docs"]
//! patterns = ["*.py"]
//!
//! [python]
//! interpreter = "/usr/bin/python3.12"
//! site_packages = [".venv/lib/python3.12/site-packages"]
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// File name of the project configuration.
pub const PROJECT_CONFIG_FILE: &str = ".preqs.toml";

/// preqs configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Source scanning settings
    pub scan: ScanConfig,

    /// Python environment settings
    pub python: PythonConfig,
}

/// Source scanning configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Directories to ignore, in addition to the built-in list.
    pub ignore_dirs: Vec<String>,

    /// File name patterns to scan (replaces `*.py`, `*.pyw` when set).
    pub patterns: Vec<String>,
}

/// Python environment configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PythonConfig {
    /// Interpreter used for the standard library list and `sys.path`.
    pub interpreter: Option<PathBuf>,

    /// Directories searched for installed distributions. When set, the
    /// interpreter's `sys.path` is not consulted for version lookups.
    /// Relative entries are resolved against the config file's directory.
    pub site_packages: Vec<PathBuf>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;

        let mut config: Config = toml::from_str(&contents)
            .with_context(|| format!("failed to parse config: {}", path.display()))?;

        if let Some(base) = path.parent() {
            config.resolve_relative(base);
        }
        Ok(config)
    }

    /// Load configuration with fallback to defaults if the file is unreadable.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    ///
    /// Ignore directories accumulate; every other setting is replaced when
    /// `other` sets it.
    pub fn merge(&mut self, other: Config) {
        for dir in other.scan.ignore_dirs {
            if !self.scan.ignore_dirs.contains(&dir) {
                self.scan.ignore_dirs.push(dir);
            }
        }
        if !other.scan.patterns.is_empty() {
            self.scan.patterns = other.scan.patterns;
        }
        if other.python.interpreter.is_some() {
            self.python.interpreter = other.python.interpreter;
        }
        if !other.python.site_packages.is_empty() {
            self.python.site_packages = other.python.site_packages;
        }
    }

    fn resolve_relative(&mut self, base: &Path) {
        for dir in &mut self.python.site_packages {
            if dir.is_relative() {
                *dir = base.join(&*dir);
            }
        }
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (`<root>/.preqs.toml`)
/// 2. Global config (`~/.preqs/config.toml`)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    if let Some(global_path) = global_path {
        if global_path.exists() {
            config.merge(Config::load_or_default(global_path));
        }
    }

    if project_path.exists() {
        config.merge(Config::load_or_default(project_path));
    }

    config
}

/// Get the global preqs config directory (`~/.preqs`).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".preqs"))
}

/// Get the global config path (`~/.preqs/config.toml`).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (`<root>/.preqs.toml`).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(PROJECT_CONFIG_FILE)
}
