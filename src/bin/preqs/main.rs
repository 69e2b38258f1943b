//! preqs CLI - generate and check requirements.txt files

use clap::Parser;
use miette::{GraphicalReportHandler, GraphicalTheme};
use tracing_subscriber::EnvFilter;

use preqs::core::{ExitCode, PreqsError};
use preqs::util::diagnostic::{emit, use_color};

mod cli;
mod commands;

use cli::Cli;

fn main() {
    let cli = Cli::parse();

    let filter = if cli.debug {
        EnvFilter::new("preqs=debug")
    } else {
        EnvFilter::new("preqs=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let code = match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            report(&err);
            err.exit_code()
        }
    };
    std::process::exit(code.code());
}

fn run(cli: &Cli) -> Result<ExitCode, PreqsError> {
    sanitise_path(&cli.path)?;

    if cli.check {
        commands::check::execute(cli)
    } else {
        commands::generate::execute(cli)
    }
}

/// Reject any PATH containing `..`.
fn sanitise_path(path: &str) -> Result<(), PreqsError> {
    if path.contains("..") {
        return Err(PreqsError::InvalidPath {
            path: path.to_string(),
        });
    }
    Ok(())
}

fn report(err: &PreqsError) {
    let color = use_color();
    if let PreqsError::Syntax(syntax) = err {
        let theme = if color {
            GraphicalTheme::unicode()
        } else {
            GraphicalTheme::unicode_nocolor()
        };
        let mut out = String::new();
        if GraphicalReportHandler::new_themed(theme)
            .render_report(&mut out, syntax)
            .is_ok()
        {
            eprintln!("{}", out);
        }
    }
    emit(&err.to_diagnostic(), color);
}
