//! Configurator use case: turns a handful of toggles into the stored form
//! configuration.

use std::sync::Arc;

use registro_core::config::{FormConfig, FormConfigRepository, RegistroConfig};
use registro_core::error::{RegistroError, Result};

/// Options offered by the configurator screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfiguratorChoices {
    pub show_session_selector: bool,
    pub ask_company: bool,
    pub ask_phone: bool,
    pub primary_color: Option<String>,
}

impl Default for ConfiguratorChoices {
    fn default() -> Self {
        Self {
            show_session_selector: true,
            ask_company: false,
            ask_phone: false,
            primary_color: None,
        }
    }
}

impl ConfiguratorChoices {
    pub fn to_config(&self) -> RegistroConfig {
        let form = FormConfig::from_toggles(
            self.show_session_selector,
            self.ask_company,
            self.ask_phone,
        );
        match &self.primary_color {
            Some(color) => RegistroConfig::new(form).with_primary_color(color.clone()),
            None => RegistroConfig::new(form),
        }
    }
}

pub struct ConfiguratorService {
    repository: Arc<dyn FormConfigRepository>,
}

impl ConfiguratorService {
    pub fn new(repository: Arc<dyn FormConfigRepository>) -> Self {
        Self { repository }
    }

    /// Stores the configuration built from `choices` and returns it.
    pub async fn save(&self, choices: &ConfiguratorChoices) -> Result<RegistroConfig> {
        if let Some(color) = &choices.primary_color {
            if !is_hex_color(color) {
                return Err(RegistroError::validation(format!(
                    "primary color '{}' is not a #rrggbb value",
                    color
                )));
            }
        }

        let config = choices.to_config();
        self.repository.save(&config).await?;
        tracing::info!("[Configurator] Form configuration saved");
        Ok(config)
    }

    pub async fn current(&self) -> Result<Option<RegistroConfig>> {
        self.repository.load().await
    }
}

fn is_hex_color(value: &str) -> bool {
    value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use registro_core::config::{DEFAULT_PRIMARY_COLOR, FieldSpec};
    use registro_infrastructure::InMemoryFormConfigRepository;

    fn service() -> ConfiguratorService {
        ConfiguratorService::new(Arc::new(InMemoryFormConfigRepository::new()))
    }

    #[tokio::test]
    async fn test_defaults_enable_sessions_only() {
        let service = service();
        assert_eq!(service.current().await.unwrap(), None);

        let saved = service.save(&ConfiguratorChoices::default()).await.unwrap();
        let form = saved.config.as_ref().unwrap();
        assert!(form.show_session_selector);
        assert!(form.extra_fields.is_empty());
        assert_eq!(saved.theme, None);

        assert_eq!(service.current().await.unwrap(), Some(saved));
    }

    #[tokio::test]
    async fn test_all_toggles() {
        let choices = ConfiguratorChoices {
            show_session_selector: false,
            ask_company: true,
            ask_phone: true,
            primary_color: Some("#0F766E".to_string()),
        };

        let saved = service().save(&choices).await.unwrap();
        let form = saved.config.as_ref().unwrap();
        assert!(!form.show_session_selector);
        assert_eq!(form.extra_fields, vec![FieldSpec::company(), FieldSpec::phone()]);
        assert_eq!(saved.primary_color_or(DEFAULT_PRIMARY_COLOR), "#0F766E");
    }

    #[tokio::test]
    async fn test_rejects_malformed_color() {
        let service = service();
        let choices = ConfiguratorChoices {
            primary_color: Some("blue".to_string()),
            ..Default::default()
        };

        assert!(service.save(&choices).await.unwrap_err().is_validation());
        assert_eq!(service.current().await.unwrap(), None);
    }
}
