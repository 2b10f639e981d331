//! Host-side mount boundary.
//!
//! The host loads the configuration envelope, mounts the form only when a
//! form configuration is present, and otherwise renders a fallback. Drawing
//! is delegated to a [`Surface`].

use std::fmt;
use std::sync::Arc;

use registro_core::RegistroError;
use registro_core::config::FormConfigRepository;
use registro_core::registration::RegistrationRepository;
use registro_core::settings::UiSettings;

use crate::form_engine::RegistrationForm;
use crate::view::FormView;

/// Text rendered in place of the form when it cannot be mounted.
pub const CONFIG_UNAVAILABLE: &str = "Configuration not available";

/// Why the form could not be mounted.
#[derive(Debug)]
pub enum MountError {
    /// No form configuration has been saved.
    ConfigUnavailable,
    /// The configuration store could not be read.
    Load(RegistroError),
}

impl fmt::Display for MountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MountError::ConfigUnavailable => f.write_str(CONFIG_UNAVAILABLE),
            MountError::Load(e) => write!(f, "{}: {}", CONFIG_UNAVAILABLE, e),
        }
    }
}

impl std::error::Error for MountError {}

/// Something that can draw the form or its fallback.
pub trait Surface {
    type Output;

    fn render(&self, view: &FormView) -> Self::Output;

    fn render_fallback(&self, error: &MountError) -> Self::Output;
}

/// A mounted form, or the reason there is none.
pub enum Mount {
    Ready(RegistrationForm),
    Unavailable(MountError),
}

impl Mount {
    pub fn render<S: Surface>(&self, surface: &S) -> S::Output {
        match self {
            Mount::Ready(form) => surface.render(&form.view()),
            Mount::Unavailable(error) => surface.render_fallback(error),
        }
    }

    pub fn into_form(self) -> Result<RegistrationForm, MountError> {
        match self {
            Mount::Ready(form) => Ok(form),
            Mount::Unavailable(error) => Err(error),
        }
    }
}

/// Wires the configuration store and the registration store into a form.
pub struct FormHost {
    config_repository: Arc<dyn FormConfigRepository>,
    registrations: Arc<dyn RegistrationRepository>,
    ui: UiSettings,
}

impl FormHost {
    pub fn new(
        config_repository: Arc<dyn FormConfigRepository>,
        registrations: Arc<dyn RegistrationRepository>,
        ui: UiSettings,
    ) -> Self {
        Self {
            config_repository,
            registrations,
            ui,
        }
    }

    /// Loads the configuration and mounts a fresh form.
    pub async fn mount(&self) -> Mount {
        let envelope = match self.config_repository.load().await {
            Ok(Some(envelope)) => envelope,
            Ok(None) => return Mount::Unavailable(MountError::ConfigUnavailable),
            Err(e) => {
                tracing::error!("[FormHost] Failed to load form configuration: {}", e);
                return Mount::Unavailable(MountError::Load(e));
            }
        };

        let Some(config) = envelope.config.as_ref() else {
            return Mount::Unavailable(MountError::ConfigUnavailable);
        };

        let duplicates = config.duplicate_field_names();
        if !duplicates.is_empty() {
            tracing::warn!(
                "[FormHost] Extra field names are not unique: {}",
                duplicates.join(", ")
            );
        }

        tracing::info!(
            "[FormHost] Mounting form (sessions: {}, extra fields: {})",
            config.show_session_selector,
            config.extra_fields.len()
        );
        Mount::Ready(RegistrationForm::new(
            envelope,
            self.registrations.clone(),
            &self.ui,
        ))
    }
}
