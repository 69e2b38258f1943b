//! `preqs [PATH]`: write or print the requirements

use std::path::Path;

use anyhow::Context;

use crate::cli::Cli;
use preqs::core::{ExitCode, PreqsError};
use preqs::ops::{generate, GenerateOptions, ScanOptions};

pub fn execute(cli: &Cli) -> Result<ExitCode, PreqsError> {
    let root = Path::new(&cli.path)
        .canonicalize()
        .with_context(|| format!("failed to resolve path: {}", cli.path))?;

    let config = super::config_for(&root);
    let env = super::environment(cli, &config);

    let scan = ScanOptions::new(&root)
        .with_ignore_dirs(config.scan.ignore_dirs)
        .with_ignore_dirs(cli.ignore_dirs.iter().cloned())
        .with_patterns(config.scan.patterns);

    let opts = GenerateOptions {
        scan,
        print: cli.print,
        replace: cli.replace,
    };

    let report = generate(&opts, &env, &env);
    if let Some(listing) = &report.listing {
        println!("{}", listing);
    }

    match report.error {
        Some(err) => Err(err),
        None => Ok(ExitCode::Ok),
    }
}
