//! Unified path management for Registro files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/registro/          # Config directory
//! ├── config.toml              # Application settings
//! └── logs/                    # Application logs
//!     └── registro.log.YYYY-MM-DD
//!
//! ~/.local/share/registro/     # Data directory
//! ├── registros.json           # Registration records slot
//! └── registro-config.json     # Form configuration slot
//! ```
//!
//! With an explicit root (`--config-dir` or `REGISTRO_HOME`) everything lives
//! under that root: `config.toml`, `logs/` and `data/`.

use std::path::PathBuf;
use thiserror::Error;

const APP_NAME: &str = "registro";

/// Errors that can occur during path resolution.
#[derive(Debug, Error)]
pub enum PathError {
    /// Platform directory could not be determined.
    #[error("Cannot determine the {0} directory")]
    DirNotFound(&'static str),
}

/// Resolves the directories Registro reads and writes.
#[derive(Debug, Clone, Default)]
pub struct RegistroPaths {
    root: Option<PathBuf>,
}

impl RegistroPaths {
    /// Creates a resolver; `root` overrides the platform directories.
    pub fn new(root: Option<PathBuf>) -> Self {
        Self { root }
    }

    /// Returns the configuration directory (e.g., `~/.config/registro/`).
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        match &self.root {
            Some(root) => Ok(root.clone()),
            None => dirs::config_dir()
                .map(|d| d.join(APP_NAME))
                .ok_or(PathError::DirNotFound("config")),
        }
    }

    /// Returns the data directory holding the slot files.
    pub fn data_dir(&self) -> Result<PathBuf, PathError> {
        match &self.root {
            Some(root) => Ok(root.join("data")),
            None => dirs::data_dir()
                .map(|d| d.join(APP_NAME))
                .ok_or(PathError::DirNotFound("data")),
        }
    }

    /// Returns the path to the application settings file.
    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    /// Returns the path to the logs directory.
    pub fn logs_dir(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("logs"))
    }
}
