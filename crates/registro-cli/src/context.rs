//! Wiring of settings and repositories for one invocation.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};

use registro_application::{ConfiguratorChoices, ConfiguratorService, FormHost};
use registro_core::config::FormConfigRepository;
use registro_core::registration::RegistrationRepository;
use registro_core::settings::AppConfig;
use registro_infrastructure::paths::RegistroPaths;
use registro_infrastructure::{
    ConfigService, InMemoryFormConfigRepository, InMemoryRegistrationRepository,
};

pub struct AppContext {
    pub settings: AppConfig,
    pub logs_dir: Option<PathBuf>,
    pub registrations: Arc<dyn RegistrationRepository>,
    pub form_config: Arc<dyn FormConfigRepository>,
}

impl AppContext {
    /// File-backed context rooted at `root`, or at the platform directories.
    pub fn persistent(root: Option<PathBuf>) -> Result<Self> {
        let service = ConfigService::new(RegistroPaths::new(root));
        let settings = service
            .get_config()
            .context("Failed to load settings")?
            .clone();
        let logs_dir = service.paths().logs_dir()?;
        let (registrations, form_config) = service.repositories()?;

        Ok(Self {
            settings,
            logs_dir: Some(logs_dir),
            registrations: Arc::new(registrations),
            form_config: Arc::new(form_config),
        })
    }

    /// In-memory context preloaded with the configurator defaults.
    pub fn ephemeral() -> Result<Self> {
        let seed = serde_json::to_vec(&ConfiguratorChoices::default().to_config())?;

        Ok(Self {
            settings: AppConfig::default(),
            logs_dir: None,
            registrations: Arc::new(InMemoryRegistrationRepository::new()),
            form_config: Arc::new(InMemoryFormConfigRepository::with_raw(seed)),
        })
    }

    pub fn host(&self) -> FormHost {
        FormHost::new(
            self.form_config.clone(),
            self.registrations.clone(),
            self.settings.ui.clone(),
        )
    }

    pub fn configurator(&self) -> ConfiguratorService {
        ConfiguratorService::new(self.form_config.clone())
    }
}
