//! The Python environment preqs runs against.

use std::cell::OnceCell;
use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::{anyhow, Result};

use crate::core::InstalledVersion;
use crate::python::interpreter::{Interpreter, Probe};
use crate::python::metadata::SitePackages;
use crate::python::{PackageIndex, StdlibSource};
use crate::util::process::find_python;

/// A lazily probed Python environment.
///
/// Nothing is executed or read until a pipeline stage first asks for the
/// standard library or an installed version, so runs that stop early never
/// need an interpreter. When explicit `site_packages` directories are
/// configured, version lookups do not need one either.
#[derive(Debug, Default)]
pub struct PythonEnvironment {
    interpreter: Option<PathBuf>,
    site_packages: Vec<PathBuf>,
    probe: OnceCell<Probe>,
    index: OnceCell<SitePackages>,
}

impl PythonEnvironment {
    pub fn new(interpreter: Option<PathBuf>, site_packages: Vec<PathBuf>) -> Self {
        PythonEnvironment {
            interpreter,
            site_packages,
            probe: OnceCell::new(),
            index: OnceCell::new(),
        }
    }

    fn probe(&self) -> Result<&Probe> {
        if let Some(probe) = self.probe.get() {
            return Ok(probe);
        }
        let path = find_python(self.interpreter.as_deref()).ok_or_else(|| {
            anyhow!("no Python interpreter found; pass --python or set PREQS_PYTHON")
        })?;
        let probe = Interpreter::new(path).probe()?;
        Ok(self.probe.get_or_init(|| probe))
    }

    fn index(&self) -> Result<&SitePackages> {
        if let Some(index) = self.index.get() {
            return Ok(index);
        }
        let index = if self.site_packages.is_empty() {
            SitePackages::scan(&self.probe()?.path)?
        } else {
            SitePackages::scan(&self.site_packages)?
        };
        Ok(self.index.get_or_init(|| index))
    }
}

impl StdlibSource for PythonEnvironment {
    fn stdlib_names(&self) -> Result<BTreeSet<String>> {
        Ok(self.probe()?.stdlib.clone())
    }
}

impl PackageIndex for PythonEnvironment {
    fn installed_version(&self, name: &str) -> Result<InstalledVersion> {
        Ok(self.index()?.lookup(name))
    }
}
