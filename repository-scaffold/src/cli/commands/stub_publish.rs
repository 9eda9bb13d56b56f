//! `stub:publish` command

use crate::config::ScaffoldConfig;
use crate::fs::LocalFilesystem;
use crate::scaffold::stubs::{publish, StubSet};
use anyhow::{Context, Result};
use console::{style, Emoji};
use std::path::PathBuf;

static CHECK: Emoji<'_, '_> = Emoji("✓ ", "");
static SKIP: Emoji<'_, '_> = Emoji("- ", "");

/// Copy the embedded stubs into `<project>/stubs`
pub struct StubPublishCommand {
    force: bool,
    project_root: PathBuf,
}

impl StubPublishCommand {
    /// Create the command
    #[must_use]
    pub const fn new(force: bool, project_root: PathBuf) -> Self {
        Self {
            force,
            project_root,
        }
    }

    /// Execute the command
    ///
    /// # Errors
    ///
    /// Returns an error if the stub directory or a stub file cannot be written.
    pub fn execute(&self) -> Result<()> {
        let config = ScaffoldConfig::load(&self.project_root)
            .context("Failed to load configuration")?;
        let stubs = StubSet::new(&self.project_root, config.stub_path.as_deref());

        if config.stub_path.is_some() {
            println!(
                "{}",
                style("Note: stub_path is configured, published stubs will not be used.").yellow()
            );
        }

        let published = publish(&LocalFilesystem, stubs.published_dir(), self.force)?;

        for stub in &published {
            if stub.written {
                println!("  {CHECK}{}", style(stub.path.display()).green());
            } else {
                println!(
                    "  {SKIP}{} {}",
                    style(stub.path.display()).dim(),
                    style("(exists, use --force to overwrite)").dim()
                );
            }
        }

        println!("{}", style("Stubs published successfully.").green().bold());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scaffold::StubTemplate;
    use tempfile::TempDir;

    #[test]
    fn test_execute_publishes_all_stubs() {
        let temp_dir = TempDir::new().unwrap();
        StubPublishCommand::new(false, temp_dir.path().to_path_buf())
            .execute()
            .unwrap();

        for stub in StubTemplate::ALL {
            let path = temp_dir.path().join("stubs").join(stub.file_name());
            assert_eq!(std::fs::read_to_string(path).unwrap(), stub.embedded());
        }
    }
}
