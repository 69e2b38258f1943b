//! Probing a Python interpreter.
//!
//! The interpreter is the authority on two things preqs does not
//! reimplement: the names of its standard library modules, and the
//! directories it searches for installed distributions.

use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::util::process::ProcessBuilder;

/// Prints what preqs needs to know about the interpreter as one JSON object.
const PROBE_SCRIPT: &str = r#"
import json, sys
names = getattr(sys, "stdlib_module_names", None)
print(json.dumps({
    "version": ".".join(map(str, sys.version_info[:3])),
    "stdlib": None if names is None else sorted(names),
    "path": [p for p in sys.path if p],
}))
"#;

/// The probe output as printed. `stdlib` is null before Python 3.10.
#[derive(Deserialize)]
struct RawProbe {
    version: String,
    stdlib: Option<BTreeSet<String>>,
    path: Vec<PathBuf>,
}

/// Facts reported by an interpreter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Probe {
    /// Interpreter version, e.g. `3.12.1`.
    pub version: String,
    /// Standard library module names.
    pub stdlib: BTreeSet<String>,
    /// `sys.path`, without empty entries.
    pub path: Vec<PathBuf>,
}

impl Probe {
    /// Parse the probe script's output.
    ///
    /// Fails for interpreters without `sys.stdlib_module_names`, since
    /// nothing else lists the full standard library.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawProbe = serde_json::from_str(json.trim())
            .context("failed to parse interpreter probe output")?;
        let Some(stdlib) = raw.stdlib else {
            bail!(
                "Python {} is not supported: preqs requires Python 3.10 or newer",
                raw.version
            );
        };
        Ok(Probe {
            version: raw.version,
            stdlib,
            path: raw.path,
        })
    }
}

/// A Python interpreter on this machine.
#[derive(Debug, Clone)]
pub struct Interpreter {
    path: PathBuf,
}

impl Interpreter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Interpreter { path: path.into() }
    }

    /// Run the probe script.
    pub fn probe(&self) -> Result<Probe> {
        tracing::debug!("Probing Python interpreter: {}", self.path.display());

        let output = ProcessBuilder::new(&self.path)
            .args(["-c", PROBE_SCRIPT])
            .env("PYTHONIOENCODING", "utf-8")
            .exec_and_check()
            .with_context(|| {
                format!("failed to probe Python interpreter {}", self.path.display())
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let probe = Probe::from_json(&stdout)?;

        tracing::debug!(
            "Python {} ({} stdlib modules, {} search paths)",
            probe.version,
            probe.stdlib.len(),
            probe.path.len()
        );
        Ok(probe)
    }
}
