//! Configuration management for repository scaffolding
//!
//! Configuration is loaded from multiple sources with clear precedence:
//!
//! 1. Environment variables (highest priority, `REPOSITORY_SCAFFOLD_` prefix)
//! 2. `<project>/repository-scaffold.toml`
//! 3. Hardcoded defaults (fallback)
//!
//! # Example Configuration
//!
//! ```toml
//! # repository-scaffold.toml
//! root_namespace = "Acme\\Blog"
//! source_root = "src"
//! extension = "php"
//! stub_path = "resources/stubs"
//! ```

use crate::error::{ScaffoldError, ScaffoldResult};
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Project-local configuration file name
pub const CONFIG_FILE_NAME: &str = "repository-scaffold.toml";

/// Prefix for environment variable overrides
pub const ENV_PREFIX: &str = "REPOSITORY_SCAFFOLD_";

/// Scaffolding configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaffoldConfig {
    /// Base namespace of the application (e.g. `App`)
    pub root_namespace: String,

    /// Directory, relative to the project root, that holds `root_namespace`
    pub source_root: PathBuf,

    /// Extension of generated files
    pub extension: String,

    /// Directory to read stubs from instead of the published or embedded ones
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stub_path: Option<PathBuf>,
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        Self {
            root_namespace: "App".to_string(),
            source_root: PathBuf::from("app"),
            extension: "php".to_string(),
            stub_path: None,
        }
    }
}

impl ScaffoldConfig {
    /// Load configuration for a project
    ///
    /// Reads `<project_root>/repository-scaffold.toml` if present, then applies
    /// `REPOSITORY_SCAFFOLD_*` environment overrides on top of the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::Config`] if:
    /// - The configuration file contains invalid TOML
    /// - A value has the wrong type
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use repository_scaffold::config::ScaffoldConfig;
    /// use std::path::Path;
    ///
    /// let config = ScaffoldConfig::load(Path::new("."))?;
    /// assert!(!config.extension.is_empty());
    /// # Ok::<(), repository_scaffold::ScaffoldError>(())
    /// ```
    pub fn load(project_root: &Path) -> ScaffoldResult<Self> {
        let mut figment = Self::defaults()?;

        let local_config = project_root.join(CONFIG_FILE_NAME);
        if local_config.exists() {
            figment = figment.merge(Toml::file(&local_config));
        }

        Self::extract(&figment.merge(Env::prefixed(ENV_PREFIX)))
    }

    /// Load configuration from a specific file
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::Config`] if the file is invalid or a value has the
    /// wrong type. A missing file falls back to defaults.
    pub fn load_from(path: &Path) -> ScaffoldResult<Self> {
        let figment = Self::defaults()?
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX));

        Self::extract(&figment)
    }

    /// Namespace segments of `root_namespace`
    ///
    /// ```rust
    /// use repository_scaffold::config::ScaffoldConfig;
    ///
    /// let config = ScaffoldConfig {
    ///     root_namespace: "\\Acme\\Blog\\".to_string(),
    ///     ..ScaffoldConfig::default()
    /// };
    /// assert_eq!(config.root_segments(), vec!["Acme", "Blog"]);
    /// ```
    #[must_use]
    pub fn root_segments(&self) -> Vec<&str> {
        self.root_namespace
            .split('\\')
            .filter(|segment| !segment.is_empty())
            .collect()
    }

    fn defaults() -> ScaffoldResult<Figment> {
        let defaults =
            toml::to_string(&Self::default()).map_err(|e| ScaffoldError::Config(e.to_string()))?;
        Ok(Figment::new().merge(Toml::string(&defaults)))
    }

    fn extract(figment: &Figment) -> ScaffoldResult<Self> {
        let config: Self = figment
            .extract()
            .map_err(|e| ScaffoldError::Config(e.to_string()))?;

        if config.extension.is_empty() || config.extension.contains(['.', '/', '\\']) {
            return Err(ScaffoldError::Config(format!(
                "extension must be a bare file extension, got \"{}\"",
                config.extension
            )));
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_default_config() {
        let config = ScaffoldConfig::default();
        assert_eq!(config.root_namespace, "App");
        assert_eq!(config.source_root, PathBuf::from("app"));
        assert_eq!(config.extension, "php");
        assert!(config.stub_path.is_none());
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        Jail::expect_with(|jail| {
            let config = ScaffoldConfig::load(jail.directory()).unwrap();
            assert_eq!(config, ScaffoldConfig::default());
            Ok(())
        });
    }

    #[test]
    fn test_load_project_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                CONFIG_FILE_NAME,
                r#"
                root_namespace = "Acme\\Blog"
                source_root = "src"
                stub_path = "resources/stubs"
                "#,
            )?;

            let config = ScaffoldConfig::load(jail.directory()).unwrap();
            assert_eq!(config.root_namespace, "Acme\\Blog");
            assert_eq!(config.source_root, PathBuf::from("src"));
            assert_eq!(config.extension, "php");
            assert_eq!(config.stub_path, Some(PathBuf::from("resources/stubs")));
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file(CONFIG_FILE_NAME, r#"root_namespace = "Acme""#)?;
            jail.set_env("REPOSITORY_SCAFFOLD_ROOT_NAMESPACE", "Shop");

            let config = ScaffoldConfig::load(jail.directory()).unwrap();
            assert_eq!(config.root_namespace, "Shop");
            assert_eq!(config.source_root, PathBuf::from("app"));
            Ok(())
        });
    }

    #[test]
    fn test_invalid_extension_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file("custom.toml", r#"extension = ".php""#)?;

            let err = ScaffoldConfig::load_from(&jail.directory().join("custom.toml")).unwrap_err();
            assert!(matches!(err, ScaffoldError::Config(_)));
            Ok(())
        });
    }

    #[test]
    fn test_root_segments_default() {
        assert_eq!(ScaffoldConfig::default().root_segments(), vec!["App"]);
    }
}
