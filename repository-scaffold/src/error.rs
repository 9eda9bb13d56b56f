//! Error types for repository scaffolding

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Scaffolding error type
///
/// Every variant aborts the remaining steps of a run. Nothing is rolled back:
/// if the repository file was already written when the interface step fails,
/// the error is [`ScaffoldError::Incomplete`] and the written file stays on disk.
#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// The class name collides with a PHP reserved word
    #[error("The name \"{0}\" is reserved by PHP.")]
    ReservedName(String),

    /// The class name is empty or is not a valid PHP identifier path
    #[error("Invalid class name \"{name}\": {reason}")]
    InvalidName {
        /// Name as supplied by the caller
        name: String,
        /// Why it was rejected
        reason: &'static str,
    },

    /// A file already exists at the destination and overwriting was not requested
    #[error("Repository already exists!")]
    AlreadyExists {
        /// Occupied destination
        path: PathBuf,
    },

    /// A stub template could not be read
    #[error("Failed to read stub {}", path.display())]
    TemplateRead {
        /// Stub location
        path: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },

    /// A destination directory could not be created
    #[error("Failed to create directory {}", path.display())]
    DirectoryCreation {
        /// Directory that could not be created
        path: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },

    /// A generated file could not be written
    #[error("Failed to write {}", path.display())]
    Write {
        /// Destination file
        path: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },

    /// The repository file was written but the interface step failed
    #[error("Repository created at {}, but the interface could not be generated", written.display())]
    Incomplete {
        /// Repository file left in place
        written: PathBuf,
        /// Failure of the interface step
        source: Box<Self>,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ScaffoldError {
    /// Whether this error left files behind on disk
    #[must_use]
    pub const fn is_partial(&self) -> bool {
        matches!(self, Self::Incomplete { .. })
    }
}

/// Result type for scaffolding operations
pub type ScaffoldResult<T> = Result<T, ScaffoldError>;
