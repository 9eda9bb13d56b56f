//! Class name parsing and qualification
//!
//! Turns the raw `name` argument (e.g. `Admin/UserRepository`) into a
//! [`QualifiedName`] such as `App\Repositories\Admin\UserRepository` and maps
//! it onto a file path under the source root.

use crate::error::{ScaffoldError, ScaffoldResult};
use std::fmt;
use std::path::PathBuf;

/// Namespace segment appended to the root namespace for generated repositories
pub const REPOSITORIES_SEGMENT: &str = "Repositories";

/// PHP reserved words and reserved type names, lowercase
///
/// Class names are compared case-insensitively, matching how PHP resolves them.
static RESERVED_NAMES: phf::Set<&'static str> = phf::phf_set! {
    "__halt_compiler", "abstract", "and", "array", "as", "break", "callable",
    "case", "catch", "class", "clone", "const", "continue", "declare",
    "default", "die", "do", "echo", "else", "elseif", "empty", "enddeclare",
    "endfor", "endforeach", "endif", "endswitch", "endwhile", "enum", "eval",
    "exit", "extends", "false", "final", "finally", "fn", "for", "foreach",
    "function", "global", "goto", "if", "implements", "include",
    "include_once", "instanceof", "insteadof", "interface", "isset", "list",
    "match", "namespace", "new", "null", "or", "parent", "print", "private",
    "protected", "public", "readonly", "require", "require_once", "return",
    "self", "static", "switch", "throw", "trait", "true", "try", "unset",
    "use", "var", "void", "while", "xor", "yield",
    "__class__", "__dir__", "__file__", "__function__", "__line__",
    "__method__", "__namespace__", "__trait__",
    "bool", "float", "int", "iterable", "mixed", "never", "object", "string",
};

/// Whether `name` is a PHP reserved word
///
/// ```rust
/// use repository_scaffold::scaffold::name::is_reserved;
///
/// assert!(is_reserved("Class"));
/// assert!(is_reserved("__CLASS__"));
/// assert!(!is_reserved("UserRepository"));
/// ```
#[must_use]
pub fn is_reserved(name: &str) -> bool {
    RESERVED_NAMES.contains(name.to_lowercase().as_str())
}

/// Whether `segment` is a valid PHP identifier
fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    let valid_start = |c: char| c == '_' || c.is_ascii_alphabetic() || !c.is_ascii();

    valid_start(first) && chars.all(|c| valid_start(c) || c.is_ascii_digit())
}

/// A validated class name as supplied on the command line
///
/// `/` and `\` both separate sub-namespace segments. The last segment is the
/// class itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassName {
    segments: Vec<String>,
}

impl ClassName {
    /// Parse and validate a raw class name
    ///
    /// # Errors
    ///
    /// - [`ScaffoldError::ReservedName`] if the class segment is a PHP reserved word
    /// - [`ScaffoldError::InvalidName`] if the name is empty or a segment is not
    ///   a valid PHP identifier
    ///
    /// # Examples
    ///
    /// ```rust
    /// use repository_scaffold::scaffold::name::ClassName;
    ///
    /// let name = ClassName::parse("Admin/UserRepository").unwrap();
    /// assert_eq!(name.base(), "UserRepository");
    /// assert_eq!(name.sub_path(), ["Admin"]);
    /// ```
    pub fn parse(input: &str) -> ScaffoldResult<Self> {
        let trimmed = input.trim().trim_matches(['/', '\\']);
        let invalid = |reason| ScaffoldError::InvalidName {
            name: input.to_string(),
            reason,
        };

        if trimmed.is_empty() {
            return Err(invalid("name must not be empty"));
        }

        let segments: Vec<String> = trimmed
            .split(['/', '\\'])
            .map(str::to_string)
            .collect();

        if let Some(base) = segments.last() {
            if is_reserved(base) {
                return Err(ScaffoldError::ReservedName(input.trim().to_string()));
            }
        }

        if segments.iter().any(String::is_empty) {
            return Err(invalid("name contains an empty path segment"));
        }
        if !segments.iter().all(|segment| is_identifier(segment)) {
            return Err(invalid("each segment must be a valid PHP identifier"));
        }

        Ok(Self { segments })
    }

    /// The class segment
    #[must_use]
    pub fn base(&self) -> &str {
        self.segments.last().map_or("", String::as_str)
    }

    /// Sub-namespace segments preceding the class
    #[must_use]
    pub fn sub_path(&self) -> &[String] {
        &self.segments[..self.segments.len() - 1]
    }

    /// Qualify against the root namespace
    ///
    /// Names already starting with the root namespace are kept as they are.
    /// Everything else lands under `<root>\Repositories`.
    ///
    /// ```rust
    /// use repository_scaffold::scaffold::name::ClassName;
    ///
    /// let name = ClassName::parse("Admin/UserRepository").unwrap();
    /// assert_eq!(
    ///     name.qualify(&["App"]).to_string(),
    ///     "App\\Repositories\\Admin\\UserRepository"
    /// );
    ///
    /// let rooted = ClassName::parse("App\\Services\\UserRepository").unwrap();
    /// assert_eq!(rooted.qualify(&["App"]).to_string(), "App\\Services\\UserRepository");
    /// ```
    #[must_use]
    pub fn qualify(&self, root: &[&str]) -> QualifiedName {
        let already_rooted = !root.is_empty()
            && self.segments.len() > root.len()
            && self.segments.iter().zip(root).all(|(segment, root)| segment.as_str() == *root);

        let segments = if already_rooted {
            self.segments.clone()
        } else {
            root.iter()
                .map(|segment| (*segment).to_string())
                .chain(std::iter::once(REPOSITORIES_SEGMENT.to_string()))
                .chain(self.segments.iter().cloned())
                .collect()
        };

        QualifiedName {
            segments,
            root_len: root.len(),
        }
    }
}

/// Fully qualified class name, e.g. `App\Repositories\UserRepository`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualifiedName {
    segments: Vec<String>,
    root_len: usize,
}

impl QualifiedName {
    /// Namespace part (everything before the class segment)
    #[must_use]
    pub fn namespace(&self) -> String {
        self.segments[..self.segments.len() - 1].join("\\")
    }

    /// Class segment
    #[must_use]
    pub fn class(&self) -> &str {
        self.segments.last().map_or("", String::as_str)
    }

    /// Path relative to the source root, with `extension` applied
    ///
    /// The root namespace maps onto the source root itself, so only the
    /// segments after it become directories.
    #[must_use]
    pub fn relative_path(&self, extension: &str) -> PathBuf {
        let mut path: PathBuf = self.segments[self.root_len..].iter().collect();
        path.set_extension(extension);
        path
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("\\"))
    }
}
