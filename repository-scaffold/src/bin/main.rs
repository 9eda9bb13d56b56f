//! repository-scaffold - generate repository classes for PHP projects
//!
//! # Usage
//!
//! ```bash
//! repository-scaffold make:repository UserRepository
//! repository-scaffold make:repository Admin/UserRepository -i
//! repository-scaffold stub:publish
//! ```

use clap::Parser;
use console::style;
use repository_scaffold::cli::{self, Cli};
use repository_scaffold::observability;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = observability::init(cli.verbose) {
        eprintln!("{} {err:#}", style("warning:").yellow().bold());
    }

    match cli::run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", style(format!("{err:#}")).red());
            ExitCode::FAILURE
        }
    }
}
