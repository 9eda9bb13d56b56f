//! Repository scaffold generator
//!
//! Resolves the destination of a repository class, renders the matching stub
//! and writes it through the injected [`Filesystem`]. With an interface
//! requested, a second file lands in an `Interfaces` directory next to the
//! repository.

use super::name::{ClassName, QualifiedName};
use super::stubs::{render, sort_imports, StubSet, StubTemplate};
use crate::config::ScaffoldConfig;
use crate::error::{ScaffoldError, ScaffoldResult};
use crate::fs::Filesystem;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Directory, next to the repository file, that holds its interface
pub const INTERFACES_DIR: &str = "Interfaces";

/// Repository scaffold generator
pub struct ScaffoldGenerator<F> {
    fs: F,
    config: ScaffoldConfig,
    project_root: PathBuf,
    stubs: StubSet,
}

impl<F: Filesystem> ScaffoldGenerator<F> {
    /// Create a generator for the project at `project_root`
    ///
    /// # Example
    ///
    /// ```rust
    /// use repository_scaffold::{MemoryFilesystem, ScaffoldConfig, ScaffoldGenerator};
    ///
    /// let generator = ScaffoldGenerator::new(
    ///     MemoryFilesystem::new(),
    ///     "/project",
    ///     ScaffoldConfig::default(),
    /// );
    /// let files = generator.generate("UserRepository", true, false).unwrap();
    /// assert_eq!(files.len(), 2);
    /// ```
    pub fn new(fs: F, project_root: impl Into<PathBuf>, config: ScaffoldConfig) -> Self {
        let project_root = project_root.into();
        let stubs = StubSet::new(&project_root, config.stub_path.as_deref());

        Self {
            fs,
            config,
            project_root,
            stubs,
        }
    }

    /// Filesystem the generator writes through
    pub const fn filesystem(&self) -> &F {
        &self.fs
    }

    /// Generate a repository class and, optionally, its interface
    ///
    /// Nothing is written when the name is rejected or, without `force`, when the
    /// repository file already exists. The interface file is not checked for
    /// existence; it is always (re)written alongside a new repository.
    ///
    /// # Errors
    ///
    /// - [`ScaffoldError::ReservedName`] / [`ScaffoldError::InvalidName`] for bad names
    /// - [`ScaffoldError::AlreadyExists`] if the repository exists and `force` is unset
    /// - [`ScaffoldError::DirectoryCreation`], [`ScaffoldError::TemplateRead`],
    ///   [`ScaffoldError::Write`] on I/O failure
    /// - [`ScaffoldError::Incomplete`] if the interface step fails after the
    ///   repository was written
    pub fn generate(
        &self,
        class_name: &str,
        create_interface: bool,
        force: bool,
    ) -> ScaffoldResult<GeneratedFiles> {
        let name = ClassName::parse(class_name)?;
        let qualified = name.qualify(&self.config.root_segments());
        let path = self.path_for(&qualified);

        debug!(
            qualified = %qualified,
            path = %path.display(),
            create_interface,
            force,
            "resolved repository destination"
        );

        if !force && self.fs.exists(&path) {
            return Err(ScaffoldError::AlreadyExists { path });
        }

        let template = if create_interface {
            StubTemplate::RepositoryWithInterface
        } else {
            StubTemplate::Repository
        };
        let namespace = qualified.namespace();
        let repository = self.emit(
            &path,
            template,
            &namespace,
            qualified.class(),
            FileKind::Repository,
        )?;

        let mut files = vec![repository];

        if create_interface {
            let interface_path = self.interface_path_for(&path, qualified.class());
            let interface_namespace = format!("{namespace}\\{INTERFACES_DIR}");

            let interface = self
                .emit(
                    &interface_path,
                    StubTemplate::Interface,
                    &interface_namespace,
                    qualified.class(),
                    FileKind::Interface,
                )
                .map_err(|source| {
                    warn!(
                        written = %path.display(),
                        error = %source,
                        "interface generation failed after repository was written"
                    );
                    ScaffoldError::Incomplete {
                        written: path.clone(),
                        source: Box::new(source),
                    }
                })?;

            files.push(interface);
        }

        Ok(GeneratedFiles { files })
    }

    /// Destination of the repository file for `qualified`
    fn path_for(&self, qualified: &QualifiedName) -> PathBuf {
        self.project_root
            .join(&self.config.source_root)
            .join(qualified.relative_path(&self.config.extension))
    }

    /// `<repository dir>/Interfaces/<Class>Interface.<ext>`
    fn interface_path_for(&self, repository: &Path, class: &str) -> PathBuf {
        let dir = repository.parent().unwrap_or(self.project_root.as_path());
        dir.join(INTERFACES_DIR)
            .join(format!("{class}Interface.{}", self.config.extension))
    }

    fn emit(
        &self,
        path: &Path,
        template: StubTemplate,
        namespace: &str,
        class: &str,
        kind: FileKind,
    ) -> ScaffoldResult<GeneratedFile> {
        if let Some(parent) = path.parent() {
            self.fs
                .create_dir_all(parent)
                .map_err(|source| ScaffoldError::DirectoryCreation {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        let stub = self.stubs.load(&self.fs, template)?;
        let contents = sort_imports(&render(&stub, namespace, class));

        self.fs
            .write(path, &contents)
            .map_err(|source| ScaffoldError::Write {
                path: path.to_path_buf(),
                source,
            })?;

        info!(path = %path.display(), bytes = contents.len(), "wrote {}", kind.label());

        Ok(GeneratedFile {
            path: path.to_path_buf(),
            bytes: contents.len(),
            kind,
        })
    }
}

/// What a generated file contains
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// Repository class
    Repository,
    /// Repository interface
    Interface,
}

impl FileKind {
    /// Human-readable label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Repository => "Repository",
            Self::Interface => "Interface",
        }
    }
}

/// Represents a written file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Destination path
    pub path: PathBuf,
    /// Number of bytes written
    pub bytes: usize,
    /// Repository or interface
    pub kind: FileKind,
}

/// Files written by one successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFiles {
    files: Vec<GeneratedFile>,
}

impl GeneratedFiles {
    /// Number of files written
    #[must_use]
    pub const fn len(&self) -> usize {
        self.files.len()
    }

    /// Always `false` for a successful run
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Iterate over the written files
    pub fn iter(&self) -> impl Iterator<Item = &GeneratedFile> {
        self.files.iter()
    }

    /// Whether an interface was written
    #[must_use]
    pub fn has_interface(&self) -> bool {
        self.files.iter().any(|file| file.kind == FileKind::Interface)
    }

    /// Summary line for the console
    ///
    /// Either `Repository created successfully.` or
    /// `Repository and Interface created successfully.`
    #[must_use]
    pub fn success_message(&self) -> String {
        let created = self
            .files
            .iter()
            .map(|file| file.kind.label())
            .collect::<Vec<_>>()
            .join(" and ");
        format!("{created} created successfully.")
    }
}

impl<'a> IntoIterator for &'a GeneratedFiles {
    type Item = &'a GeneratedFile;
    type IntoIter = std::slice::Iter<'a, GeneratedFile>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.iter()
    }
}
