//! Command implementations

pub mod check;
pub mod generate;

use std::path::Path;

use preqs::util::config::{global_config_path, load_config, project_config_path};
use preqs::util::Config;
use preqs::PythonEnvironment;

use crate::cli::Cli;

/// Global config merged with the project config found at `root`.
fn config_for(root: &Path) -> Config {
    load_config(global_config_path().as_deref(), &project_config_path(root))
}

/// The Python environment to run against: `--python` beats the config.
fn environment(cli: &Cli, config: &Config) -> PythonEnvironment {
    let interpreter = cli
        .python
        .clone()
        .or_else(|| config.python.interpreter.clone());
    PythonEnvironment::new(interpreter, config.python.site_packages.clone())
}
