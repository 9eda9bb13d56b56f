//! Repository scaffold implementation
//!
//! Parses the requested class name, resolves where the repository (and its
//! optional interface) belong, and renders them from stub templates.

pub mod generator;
pub mod name;
pub mod stubs;

pub use generator::{FileKind, GeneratedFile, GeneratedFiles, ScaffoldGenerator};
pub use name::{ClassName, QualifiedName};
pub use stubs::{StubSet, StubTemplate};
