//! Filesystem abstraction used by the generator
//!
//! The generator never touches `std::fs` directly. It receives a
//! [`Filesystem`] so the same code runs against the real disk
//! ([`LocalFilesystem`]) or against memory ([`MemoryFilesystem`]) in tests.

use parking_lot::RwLock;
use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};

/// Filesystem operations needed to scaffold files
///
/// # Examples
///
/// ```rust
/// use repository_scaffold::fs::{Filesystem, MemoryFilesystem};
/// use std::path::Path;
///
/// let fs = MemoryFilesystem::new();
/// fs.create_dir_all(Path::new("/project/app")).unwrap();
/// fs.write(Path::new("/project/app/a.php"), "<?php").unwrap();
/// assert!(fs.exists(Path::new("/project/app/a.php")));
/// ```
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Whether a file or directory exists at `path`
    fn exists(&self, path: &Path) -> bool;

    /// Reads a whole file as UTF-8
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or unreadable.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Writes `contents` to `path`, replacing any existing file
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory is missing or the write fails.
    fn write(&self, path: &Path, contents: &str) -> io::Result<()>;

    /// Creates `path` and all missing ancestors
    ///
    /// Succeeds without changes when the directory already exists.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory cannot be created.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;
}

/// Real filesystem backed by `std::fs`
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFilesystem;

impl Filesystem for LocalFilesystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        std::fs::write(path, contents)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }
}

/// In-memory filesystem double
///
/// Mirrors the behaviour of a real disk closely enough to catch ordering
/// mistakes: writing into a directory that was never created fails with
/// [`io::ErrorKind::NotFound`].
#[derive(Debug, Default)]
pub struct MemoryFilesystem {
    files: RwLock<BTreeMap<PathBuf, String>>,
    dirs: RwLock<BTreeSet<PathBuf>>,
}

impl MemoryFilesystem {
    /// Creates an empty filesystem
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a file, creating its parent directories
    #[must_use]
    pub fn with_file(self, path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        let path = path.into();
        if let Some(parent) = path.parent() {
            self.insert_dirs(parent);
        }
        self.files.write().insert(path, contents.into());
        self
    }

    /// Returns the contents of a file, if present
    #[must_use]
    pub fn file(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files.read().get(path.as_ref()).cloned()
    }

    /// Paths of all files, in sorted order
    #[must_use]
    pub fn files(&self) -> Vec<PathBuf> {
        self.files.read().keys().cloned().collect()
    }

    /// Paths of all directories, in sorted order
    #[must_use]
    pub fn dirs(&self) -> Vec<PathBuf> {
        self.dirs.read().iter().cloned().collect()
    }

    fn insert_dirs(&self, path: &Path) {
        let mut dirs = self.dirs.write();
        for ancestor in path.ancestors() {
            if ancestor.as_os_str().is_empty() {
                continue;
            }
            dirs.insert(ancestor.to_path_buf());
        }
    }

    fn has_dir(&self, path: &Path) -> bool {
        path.as_os_str().is_empty() || self.dirs.read().contains(path)
    }
}

impl Filesystem for MemoryFilesystem {
    fn exists(&self, path: &Path) -> bool {
        self.files.read().contains_key(path) || self.dirs.read().contains(path)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.file(path).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} does not exist", path.display()),
            )
        })
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        if self.dirs.read().contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::IsADirectory,
                format!("{} is a directory", path.display()),
            ));
        }
        if let Some(parent) = path.parent() {
            if !self.has_dir(parent) {
                return Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("{} does not exist", parent.display()),
                ));
            }
        }
        self.files.write().insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        if self.files.read().contains_key(path) {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{} is a file", path.display()),
            ));
        }
        self.insert_dirs(path);
        Ok(())
    }
}
