//! Stub templates and placeholder substitution
//!
//! Stubs are resolved in this order:
//!
//! 1. The configured `stub_path` directory, if any (strict: a missing file is an error)
//! 2. A published copy in `<project>/stubs/`
//! 3. The default compiled into the binary

use crate::error::{ScaffoldError, ScaffoldResult};
use crate::fs::Filesystem;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::debug;

/// Token replaced by the namespace of the generated class
pub const NAMESPACE_PLACEHOLDER: &str = "{{ namespace }}";

/// Token replaced by the class name
pub const CLASS_PLACEHOLDER: &str = "{{ class }}";

/// Directory, relative to the project root, that `stub:publish` writes to
pub const PUBLISHED_STUB_DIR: &str = "stubs";

/// First contiguous block of top-level `use` statements, LF or CRLF terminated
static IMPORT_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?mR)(?:^use [^;{\r\n]+;$(?:\r?\n)?)+").expect("import block pattern is valid")
});

static EMBEDDED_STUBS: phf::Map<&'static str, &'static str> = phf::phf_map! {
    "repository.stub" => include_str!("stubs/repository.stub"),
    "repository.interface.stub" => include_str!("stubs/repository.interface.stub"),
    "interface.stub" => include_str!("stubs/interface.stub"),
};

/// The three stub templates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StubTemplate {
    /// Plain repository class
    Repository,
    /// Repository class implementing its interface
    RepositoryWithInterface,
    /// Repository interface
    Interface,
}

impl StubTemplate {
    /// Every stub, in publish order
    pub const ALL: [Self; 3] = [Self::Repository, Self::RepositoryWithInterface, Self::Interface];

    /// File name of the stub
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Repository => "repository.stub",
            Self::RepositoryWithInterface => "repository.interface.stub",
            Self::Interface => "interface.stub",
        }
    }

    /// Default contents shipped with the binary
    #[must_use]
    pub fn embedded(self) -> &'static str {
        EMBEDDED_STUBS
            .get(self.file_name())
            .copied()
            .unwrap_or_default()
    }
}

/// Replace both placeholders in a single left-to-right pass
///
/// Every occurrence of each token is replaced. Substituted text is never
/// scanned again, so a value containing a token is emitted literally.
///
/// ```rust
/// use repository_scaffold::scaffold::stubs::render;
///
/// let out = render("namespace {{ namespace }};\nclass {{ class }} {}", "App\\Repositories", "User");
/// assert_eq!(out, "namespace App\\Repositories;\nclass User {}");
/// ```
#[must_use]
pub fn render(stub: &str, namespace: &str, class: &str) -> String {
    let replacements = [(NAMESPACE_PLACEHOLDER, namespace), (CLASS_PLACEHOLDER, class)];
    let mut output = String::with_capacity(stub.len() + namespace.len() + class.len());
    let mut rest = stub;

    loop {
        let next = replacements
            .iter()
            .filter_map(|&(token, value)| rest.find(token).map(|at| (at, token, value)))
            .min_by_key(|&(at, ..)| at);
        let Some((at, token, value)) = next else {
            break;
        };

        output.push_str(&rest[..at]);
        output.push_str(value);
        rest = &rest[at + token.len()..];
    }

    output.push_str(rest);
    output
}

/// Sort the first block of `use` imports alphabetically
///
/// ```rust
/// use repository_scaffold::scaffold::stubs::sort_imports;
///
/// let source = "<?php\n\nuse B\\Two;\nuse A\\One;\n\nclass X {}\n";
/// assert_eq!(sort_imports(source), "<?php\n\nuse A\\One;\nuse B\\Two;\n\nclass X {}\n");
/// ```
#[must_use]
pub fn sort_imports(source: &str) -> String {
    let Some(block) = IMPORT_BLOCK.find(source) else {
        return source.to_string();
    };

    let text = block.as_str();
    let mut imports: Vec<&str> = text.lines().collect();
    imports.sort_unstable();

    let newline = if text.contains("\r\n") { "\r\n" } else { "\n" };
    let mut sorted = imports.join(newline);
    if text.ends_with('\n') {
        sorted.push_str(newline);
    }

    format!("{}{sorted}{}", &source[..block.start()], &source[block.end()..])
}

/// Stub lookup for one project
#[derive(Debug, Clone)]
pub struct StubSet {
    published_dir: PathBuf,
    override_dir: Option<PathBuf>,
}

impl StubSet {
    /// Create a lookup rooted at `project_root`
    ///
    /// `override_dir` is resolved against `project_root` when relative.
    #[must_use]
    pub fn new(project_root: &Path, override_dir: Option<&Path>) -> Self {
        Self {
            published_dir: project_root.join(PUBLISHED_STUB_DIR),
            override_dir: override_dir.map(|dir| project_root.join(dir)),
        }
    }

    /// Load the text of a stub
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::TemplateRead`] if the configured stub directory
    /// lacks the file, or a published stub exists but cannot be read.
    pub fn load(&self, fs: &impl Filesystem, stub: StubTemplate) -> ScaffoldResult<String> {
        if let Some(dir) = &self.override_dir {
            let path = dir.join(stub.file_name());
            debug!(stub = stub.file_name(), path = %path.display(), "loading configured stub");
            return Self::read(fs, &path);
        }

        let published = self.published_dir.join(stub.file_name());
        if fs.exists(&published) {
            debug!(stub = stub.file_name(), path = %published.display(), "loading published stub");
            return Self::read(fs, &published);
        }

        debug!(stub = stub.file_name(), "using embedded stub");
        Ok(stub.embedded().to_string())
    }

    /// Directory that `stub:publish` writes to
    #[must_use]
    pub fn published_dir(&self) -> &Path {
        &self.published_dir
    }

    fn read(fs: &impl Filesystem, path: &Path) -> ScaffoldResult<String> {
        fs.read_to_string(path)
            .map_err(|source| ScaffoldError::TemplateRead {
                path: path.to_path_buf(),
                source,
            })
    }
}

/// Outcome of publishing one stub
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedStub {
    /// Destination of the stub
    pub path: PathBuf,
    /// `false` when an existing file was left untouched
    pub written: bool,
}

/// Copy the embedded stubs into `dir` so they can be customised
///
/// Existing files are kept unless `force` is set.
///
/// # Errors
///
/// Returns [`ScaffoldError::DirectoryCreation`] or [`ScaffoldError::Write`] on I/O failure.
pub fn publish(fs: &impl Filesystem, dir: &Path, force: bool) -> ScaffoldResult<Vec<PublishedStub>> {
    fs.create_dir_all(dir)
        .map_err(|source| ScaffoldError::DirectoryCreation {
            path: dir.to_path_buf(),
            source,
        })?;

    StubTemplate::ALL
        .iter()
        .map(|stub| -> ScaffoldResult<PublishedStub> {
            let path = dir.join(stub.file_name());
            if !force && fs.exists(&path) {
                debug!(path = %path.display(), "stub already published");
                return Ok(PublishedStub { path, written: false });
            }

            fs.write(&path, stub.embedded())
                .map_err(|source| ScaffoldError::Write {
                    path: path.clone(),
                    source,
                })?;
            Ok(PublishedStub { path, written: true })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MemoryFilesystem;
    use proptest::prelude::*;

    #[test]
    fn test_embedded_stubs_have_placeholders() {
        for stub in StubTemplate::ALL {
            let text = stub.embedded();
            assert!(text.contains(NAMESPACE_PLACEHOLDER), "{}", stub.file_name());
            assert!(text.contains(CLASS_PLACEHOLDER), "{}", stub.file_name());
        }
    }

    #[test]
    fn test_render_repository_stub() {
        let out = render(StubTemplate::Repository.embedded(), "App\\Repositories", "UserRepository");
        assert!(out.contains("namespace App\\Repositories;"));
        assert!(out.contains("class UserRepository\n"));
        assert!(!out.contains("{{"));
    }

    #[test]
    fn test_render_repository_with_interface_stub() {
        let out = render(
            StubTemplate::RepositoryWithInterface.embedded(),
            "App\\Repositories",
            "UserRepository",
        );
        assert!(out.contains("use App\\Repositories\\Interfaces\\UserRepositoryInterface;"));
        assert!(out.contains("class UserRepository implements UserRepositoryInterface"));
    }

    #[test]
    fn test_render_is_not_recursive() {
        let out = render("{{ namespace }}|{{ class }}", "{{ class }}", "X");
        assert_eq!(out, "{{ class }}|X");
    }

    #[test]
    fn test_sort_imports_without_imports() {
        let source = "<?php\n\nclass X {}\n";
        assert_eq!(sort_imports(source), source);
    }

    #[test]
    fn test_sort_imports_only_first_block() {
        let source = "use C;\nuse A;\n\nclass X {\n    use Z;\n}\nuse B;\n";
        assert_eq!(sort_imports(source), "use A;\nuse C;\n\nclass X {\n    use Z;\n}\nuse B;\n");
    }

    #[test]
    fn test_sort_imports_crlf() {
        let source = "<?php\r\n\r\nuse B\\Two;\r\nuse A\\One;\r\n\r\nclass X {}\r\n";
        assert_eq!(
            sort_imports(source),
            "<?php\r\n\r\nuse A\\One;\r\nuse B\\Two;\r\n\r\nclass X {}\r\n"
        );
    }

    #[test]
    fn test_load_prefers_published_stub() {
        let fs = MemoryFilesystem::new()
            .with_file("/project/stubs/repository.stub", "custom {{ class }}");
        let stubs = StubSet::new(Path::new("/project"), None);

        assert_eq!(stubs.load(&fs, StubTemplate::Repository).unwrap(), "custom {{ class }}");
        assert_eq!(
            stubs.load(&fs, StubTemplate::Interface).unwrap(),
            StubTemplate::Interface.embedded()
        );
    }

    #[test]
    fn test_load_configured_dir_is_strict() {
        let fs = MemoryFilesystem::new();
        let stubs = StubSet::new(Path::new("/project"), Some(Path::new("resources/stubs")));

        let err = stubs.load(&fs, StubTemplate::Repository).unwrap_err();
        match err {
            ScaffoldError::TemplateRead { path, .. } => {
                assert_eq!(path, PathBuf::from("/project/resources/stubs/repository.stub"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_publish_skips_existing() {
        let fs = MemoryFilesystem::new().with_file("/project/stubs/repository.stub", "mine");
        let published = publish(&fs, Path::new("/project/stubs"), false).unwrap();

        assert_eq!(published.len(), 3);
        assert!(!published[0].written);
        assert!(published[1].written);
        assert!(published[2].written);
        assert_eq!(fs.file("/project/stubs/repository.stub").as_deref(), Some("mine"));
    }

    #[test]
    fn test_publish_force_overwrites() {
        let fs = MemoryFilesystem::new().with_file("/project/stubs/repository.stub", "mine");
        let published = publish(&fs, Path::new("/project/stubs"), true).unwrap();

        assert!(published.iter().all(|stub| stub.written));
        assert_eq!(
            fs.file("/project/stubs/repository.stub").as_deref(),
            Some(StubTemplate::Repository.embedded())
        );
    }

    proptest! {
        #[test]
        fn prop_render_leaves_no_placeholders(
            namespace in "[A-Z][a-z]{0,6}(\\\\[A-Z][a-z]{0,6}){0,3}",
            class in "[A-Z][A-Za-z0-9]{0,10}",
        ) {
            for stub in StubTemplate::ALL {
                let out = render(stub.embedded(), &namespace, &class);
                prop_assert!(!out.contains(NAMESPACE_PLACEHOLDER));
                prop_assert!(!out.contains(CLASS_PLACEHOLDER));
                let namespace_line = format!("namespace {namespace};");
                prop_assert!(out.contains(&namespace_line));
            }
        }
    }
}
