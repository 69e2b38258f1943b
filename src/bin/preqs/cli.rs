//! CLI definitions using clap.

use std::path::PathBuf;

use clap::Parser;

/// preqs - generate a requirements.txt file for a Python project
///
/// Scans the project for import statements, drops standard library and
/// local modules, and pins each remaining package to its installed version.
#[derive(Parser)]
#[command(name = "preqs")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Project root to scan, or with --check, the requirements file (or
    /// its directory)
    #[arg(value_name = "PATH", default_value = ".")]
    pub path: String,

    /// Enable debug output
    #[arg(short, long)]
    pub debug: bool,

    /// Additional directories to ignore while scanning
    #[arg(short, long, value_name = "DIR", num_args = 1..)]
    pub ignore_dirs: Vec<String>,

    /// Print the requirements instead of writing requirements.txt
    #[arg(short, long, conflicts_with = "check")]
    pub print: bool,

    /// Replace an existing requirements.txt
    #[arg(short, long, conflicts_with = "check")]
    pub replace: bool,

    /// Compare an existing requirements.txt with the installed packages
    #[arg(short, long)]
    pub check: bool,

    /// Python interpreter used for standard library and package lookups
    #[arg(long, value_name = "PATH", env = "PREQS_PYTHON")]
    pub python: Option<PathBuf>,
}
