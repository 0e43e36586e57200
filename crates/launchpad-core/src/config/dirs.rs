use crate::{Error, Result};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Application directories following the XDG base directory layout
#[derive(Debug, Clone)]
pub struct Directories {
    /// `config.json` inside the config directory (~/.config/launchpad)
    pub config_file: PathBuf,
}

impl Directories {
    /// Resolve the standard XDG paths.
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self> {
        let project = ProjectDirs::from("", "", "launchpad")
            .ok_or_else(|| Error::Config("cannot determine home directory".to_string()))?;
        Ok(Self::with_base(project.config_dir()))
    }

    #[must_use]
    pub fn with_base(base: &Path) -> Self {
        Self {
            config_file: base.join("config.json"),
        }
    }
}
