//! Command-line interface
//!
//! Commands:
//! - `make:repository` - Create a repository class and optional interface
//! - `stub:publish` - Copy the stubs into the project for customization

pub mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{MakeRepositoryCommand, StubPublishCommand};
use std::path::PathBuf;

/// Top-level parser for the `repository-scaffold` binary
#[derive(Debug, Parser)]
#[command(name = "repository-scaffold")]
#[command(version)]
#[command(about = "Generate repository classes and interfaces for PHP projects", long_about = None)]
pub struct Cli {
    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a new repository class and optional interface
    #[command(name = "make:repository")]
    MakeRepository {
        /// Repository class name, optionally nested (e.g. `Admin/UserRepository`)
        name: String,
        /// Create a repository interface as well
        #[arg(short, long)]
        interface: bool,
        /// Overwrite the repository if it already exists
        #[arg(long)]
        force: bool,
        /// Project root (defaults to current directory)
        #[arg(long, default_value = ".")]
        path: PathBuf,
    },
    /// Publish the repository stubs for customization
    #[command(name = "stub:publish")]
    StubPublish {
        /// Overwrite stubs that were already published
        #[arg(long)]
        force: bool,
        /// Project root (defaults to current directory)
        #[arg(long, default_value = ".")]
        path: PathBuf,
    },
}

/// Run a CLI command
///
/// # Errors
///
/// Returns an error if the command fails to execute
pub fn run(command: Command) -> Result<()> {
    match command {
        Command::MakeRepository {
            name,
            interface,
            force,
            path,
        } => {
            let cmd = MakeRepositoryCommand::new(name, interface, force, path);
            cmd.execute()?;
        }
        Command::StubPublish { force, path } => {
            let cmd = StubPublishCommand::new(force, path);
            cmd.execute()?;
        }
    }

    Ok(())
}
