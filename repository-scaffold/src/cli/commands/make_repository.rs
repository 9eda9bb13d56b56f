//! `make:repository` command
//!
//! ```bash
//! repository-scaffold make:repository UserRepository
//! repository-scaffold make:repository Admin/UserRepository --interface
//! repository-scaffold make:repository UserRepository --force
//! ```

use crate::config::ScaffoldConfig;
use crate::fs::LocalFilesystem;
use crate::scaffold::ScaffoldGenerator;
use anyhow::{Context, Result};
use console::{style, Emoji};
use std::path::{Path, PathBuf};

static SUCCESS: Emoji<'_, '_> = Emoji("✓", "√");

/// Create a repository class and optional interface
pub struct MakeRepositoryCommand {
    name: String,
    interface: bool,
    force: bool,
    project_root: PathBuf,
}

impl MakeRepositoryCommand {
    /// Create the command
    #[must_use]
    pub const fn new(name: String, interface: bool, force: bool, project_root: PathBuf) -> Self {
        Self {
            name,
            interface,
            force,
            project_root,
        }
    }

    /// Execute the command
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration cannot be loaded
    /// - The name is reserved or invalid
    /// - The repository already exists and `--force` was not given
    /// - A stub cannot be read or a file cannot be written
    pub fn execute(&self) -> Result<()> {
        let config = ScaffoldConfig::load(&self.project_root).with_context(|| {
            format!(
                "Failed to load configuration from {}",
                self.project_root.display()
            )
        })?;

        let generator = ScaffoldGenerator::new(LocalFilesystem, self.project_root.clone(), config);
        let files = generator.generate(&self.name, self.interface, self.force)?;

        for file in &files {
            println!(
                "  {SUCCESS} {}",
                style(display_path(&self.project_root, &file.path).display()).dim()
            );
        }
        println!("{}", style(files.success_message()).green().bold());

        Ok(())
    }
}

/// Path relative to the project root when possible
fn display_path<'a>(project_root: &Path, path: &'a Path) -> &'a Path {
    path.strip_prefix(project_root).unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScaffoldError;
    use tempfile::TempDir;

    #[test]
    fn test_display_path_strips_root() {
        let path = Path::new("/srv/app/app/Repositories/UserRepository.php");
        assert_eq!(
            display_path(Path::new("/srv/app"), path),
            Path::new("app/Repositories/UserRepository.php")
        );
        assert_eq!(display_path(Path::new("/elsewhere"), path), path);
    }

    #[test]
    fn test_execute_writes_files() {
        let temp_dir = TempDir::new().unwrap();
        let cmd = MakeRepositoryCommand::new(
            "UserRepository".to_string(),
            true,
            false,
            temp_dir.path().to_path_buf(),
        );

        cmd.execute().unwrap();

        assert!(temp_dir
            .path()
            .join("app/Repositories/UserRepository.php")
            .is_file());
        assert!(temp_dir
            .path()
            .join("app/Repositories/Interfaces/UserRepositoryInterface.php")
            .is_file());
    }

    #[test]
    fn test_execute_reports_reserved_name() {
        let temp_dir = TempDir::new().unwrap();
        let cmd = MakeRepositoryCommand::new(
            "Class".to_string(),
            false,
            false,
            temp_dir.path().to_path_buf(),
        );

        let err = cmd.execute().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ScaffoldError>(),
            Some(ScaffoldError::ReservedName(_))
        ));
        assert_eq!(err.to_string(), "The name \"Class\" is reserved by PHP.");
    }
}
