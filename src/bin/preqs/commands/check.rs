//! `preqs --check [PATH]`: compare requirements.txt with installed packages

use std::path::{Path, PathBuf};

use crate::cli::Cli;
use preqs::core::{ExitCode, PreqsError};
use preqs::ops::{check, format_report};
use preqs::util::fs::normalize_path;

pub fn execute(cli: &Cli) -> Result<ExitCode, PreqsError> {
    let path = normalize_path(Path::new(&cli.path));

    // Project config sits next to the requirements file.
    let root = if path.is_dir() {
        path.clone()
    } else {
        path.parent().map_or_else(|| PathBuf::from("."), Path::to_path_buf)
    };
    let config = super::config_for(&root);
    let env = super::environment(cli, &config);

    let results = check(&path, &env)?;
    println!("\n{}", format_report(&results));

    Ok(ExitCode::Ok)
}
