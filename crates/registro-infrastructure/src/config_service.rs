//! Configuration service implementation.
//!
//! Loads the application settings from `config.toml` and wires the slot
//! store they point at.

use once_cell::sync::OnceCell;
use std::path::PathBuf;
use std::sync::Arc;

use registro_core::RegistroError;
use registro_core::error::Result;
use registro_core::settings::AppConfig;

use crate::paths::RegistroPaths;
use crate::storage::{AtomicTomlFile, SlotStore};
use crate::{JsonFormConfigRepository, JsonRegistrationRepository};

/// Loads and caches the application settings.
///
/// The settings file is created with defaults on first access.
#[derive(Debug)]
pub struct ConfigService {
    paths: RegistroPaths,
    config: OnceCell<AppConfig>,
}

impl ConfigService {
    pub fn new(paths: RegistroPaths) -> Self {
        Self {
            paths,
            config: OnceCell::new(),
        }
    }

    pub fn paths(&self) -> &RegistroPaths {
        &self.paths
    }

    /// Gets the settings, loading them from file on first call.
    pub fn get_config(&self) -> Result<&AppConfig> {
        self.config.get_or_try_init(|| -> Result<AppConfig> {
            let path = self
                .paths
                .config_file()
                .map_err(|e| RegistroError::config(e.to_string()))?;

            tracing::debug!("[ConfigService] Loading settings from {:?}", path);

            let file = AtomicTomlFile::<AppConfig>::new(path);
            Ok(file.load_or_init(AppConfig::default())?)
        })
    }

    /// Directory of the slot files: `storage.data_dir` or the platform data directory.
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.get_config()?.storage.data_dir {
            return Ok(dir.clone());
        }
        self.paths
            .data_dir()
            .map_err(|e| RegistroError::config(e.to_string()))
    }

    /// Builds the slot store for the configured data directory.
    pub fn slot_store(&self) -> Result<Arc<SlotStore>> {
        Ok(Arc::new(SlotStore::new(self.data_dir()?)))
    }

    /// Builds the file-backed repositories for the configured slots.
    pub fn repositories(&self) -> Result<(JsonRegistrationRepository, JsonFormConfigRepository)> {
        let config = self.get_config()?;
        let store = self.slot_store()?;

        Ok((
            JsonRegistrationRepository::new(
                store.clone(),
                config.storage.registrations_slot.clone(),
            ),
            JsonFormConfigRepository::new(store, config.storage.config_slot.clone()),
        ))
    }
}
