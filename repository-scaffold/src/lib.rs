//! Repository scaffolding for PHP application projects
//!
//! Generates repository classes, and optionally a matching interface, from
//! stub templates. The library can be driven directly through
//! [`ScaffoldGenerator`]; the `repository-scaffold` binary wraps it in a
//! `make:repository` command.
//!
//! # Example
//!
//! ```rust,no_run
//! use repository_scaffold::{LocalFilesystem, ScaffoldConfig, ScaffoldGenerator};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), repository_scaffold::ScaffoldError> {
//! let root = Path::new(".");
//! let generator = ScaffoldGenerator::new(LocalFilesystem, root, ScaffoldConfig::load(root)?);
//! let files = generator.generate("UserRepository", true, false)?;
//! println!("{}", files.success_message());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod fs;
#[cfg(feature = "cli")]
pub mod observability;
pub mod scaffold;

pub use config::ScaffoldConfig;
pub use error::{ScaffoldError, ScaffoldResult};
pub use fs::{Filesystem, LocalFilesystem, MemoryFilesystem};
pub use scaffold::{GeneratedFile, GeneratedFiles, ScaffoldGenerator};
