//! Registration form engine.
//!
//! Owns one [`FormState`], validates it on every change and appends a
//! [`RegistrationRecord`] to the injected repository on a valid submission.
//! All transitions are driven by discrete input events on `&mut self`.

use std::sync::Arc;

use registro_core::catalog;
use registro_core::config::{FormConfig, RegistroConfig};
use registro_core::error::{RegistroError, Result};
use registro_core::form::{FieldKey, FormErrors, FormState, validate};
use registro_core::registration::{RegistrationRecord, RegistrationRepository};
use registro_core::settings::UiSettings;

use crate::toast::ToastNotifier;
use crate::view::{self, FieldView, FormView, SessionSelectorView};

/// Toast shown after a registration is stored.
pub const SUCCESS_MESSAGE: &str = "Registration completed.";

/// Result of a submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The record was appended and the form was reset.
    Accepted(RegistrationRecord),
    /// Validation failed; `focus` is the first invalid input.
    Rejected { focus: FieldKey },
}

pub struct RegistrationForm {
    config: RegistroConfig,
    primary_color: String,
    state: FormState,
    focus: Option<FieldKey>,
    repository: Arc<dyn RegistrationRepository>,
    toast: ToastNotifier,
}

impl RegistrationForm {
    pub fn new(
        config: RegistroConfig,
        repository: Arc<dyn RegistrationRepository>,
        ui: &UiSettings,
    ) -> Self {
        let primary_color = config
            .primary_color_or(&ui.default_primary_color)
            .to_string();
        let state = FormState::for_config(config.config.as_ref());

        Self {
            config,
            primary_color,
            state,
            focus: None,
            repository,
            toast: ToastNotifier::new(ui.toast_duration()),
        }
    }

    pub fn form_config(&self) -> Option<&FormConfig> {
        self.config.config.as_ref()
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn primary_color(&self) -> &str {
        &self.primary_color
    }

    pub fn shows_sessions(&self) -> bool {
        self.form_config().is_some_and(|c| c.show_session_selector)
    }

    pub fn set_name(&mut self, value: impl Into<String>) {
        self.state.set_name(value);
        tracing::debug!("[RegistrationForm] name changed");
    }

    pub fn set_email(&mut self, value: impl Into<String>) {
        self.state.set_email(value);
        tracing::debug!("[RegistrationForm] email changed");
    }

    /// Toggles a catalog session. Names outside the catalog are rejected.
    pub fn toggle_session(&mut self, session: &str) -> Result<bool> {
        let selected = self.state.toggle_session(session)?;
        tracing::debug!(
            "[RegistrationForm] session '{}' {}",
            session,
            if selected { "selected" } else { "deselected" }
        );
        Ok(selected)
    }

    /// Toggles the session at 1-based catalog position `index`.
    pub fn toggle_session_at(&mut self, index: usize) -> Result<bool> {
        let session = catalog::by_index(index)
            .ok_or_else(|| RegistroError::not_found("Session", index.to_string()))?;
        self.toggle_session(session.name)
    }

    pub fn set_extra(&mut self, name: &str, value: impl Into<String>) -> Result<()> {
        self.state.set_extra(name, value)?;
        tracing::debug!("[RegistrationForm] extra field '{}' changed", name);
        Ok(())
    }

    /// Marks an input as interacted with, making its error visible.
    pub fn blur(&mut self, key: FieldKey) {
        self.state.touch(key);
    }

    pub fn errors(&self) -> FormErrors {
        validate(&self.state, self.form_config())
    }

    /// Error of `key` if the input has been touched.
    pub fn visible_error(&self, key: &FieldKey) -> Option<&'static str> {
        view::visible(&self.errors(), &self.state, key)
    }

    /// Disabled once the user has interacted and the form has errors.
    pub fn submit_disabled(&self) -> bool {
        self.state.any_touched() && self.errors().has_errors()
    }

    pub fn focus(&self) -> Option<&FieldKey> {
        self.focus.as_ref()
    }

    pub fn toast(&self) -> Option<String> {
        self.toast.current()
    }

    /// Validates and, if the form is valid, stores a new registration.
    ///
    /// A failed append is returned as an error and leaves the values as typed.
    pub async fn submit(&mut self) -> Result<SubmitOutcome> {
        self.state.touch(FieldKey::Name);
        self.state.touch(FieldKey::Email);
        if self.shows_sessions() {
            self.state.touch(FieldKey::Sessions);
        }

        let errors = self.errors();
        if let Some(focus) = errors.first_invalid() {
            tracing::debug!("[RegistrationForm] Submission rejected, focus on '{}'", focus);
            self.focus = Some(focus.clone());
            return Ok(SubmitOutcome::Rejected { focus });
        }

        let record = RegistrationRecord::new(
            self.state.name(),
            self.state.email(),
            self.state.sessions().to_vec(),
        );
        self.repository.append(&record).await?;

        tracing::info!(
            "[RegistrationForm] Registration {} stored ({} session(s))",
            record.id,
            record.sessions.len()
        );

        self.toast.show(SUCCESS_MESSAGE);
        self.state.reset();
        self.focus = None;

        Ok(SubmitOutcome::Accepted(record))
    }

    /// Resets every value and the touched set. The toast is left alone.
    pub fn clear(&mut self) {
        self.state.reset();
        self.focus = None;
        tracing::debug!("[RegistrationForm] cleared");
    }

    pub fn view(&self) -> FormView {
        let errors = self.errors();
        let visible = |key: &FieldKey| view::visible(&errors, &self.state, key);

        let mut fields = vec![
            FieldView::name(&self.state, visible(&FieldKey::Name)),
            FieldView::email(&self.state, visible(&FieldKey::Email)),
        ];
        if let Some(config) = self.form_config() {
            fields.extend(
                config
                    .extra_fields
                    .iter()
                    .map(|spec| FieldView::extra(spec, &self.state)),
            );
        }

        let sessions = self
            .shows_sessions()
            .then(|| SessionSelectorView::new(&self.state, visible(&FieldKey::Sessions)));

        let toast = self.toast.current();
        FormView {
            title: view::TITLE,
            subtitle: view::SUBTITLE,
            primary_color: self.primary_color.clone(),
            fields,
            sessions,
            submit_disabled: self.submit_disabled(),
            status: if toast.is_some() {
                view::STATUS_COMPLETED
            } else {
                ""
            },
            toast,
            focus: self.focus.as_ref().map(|k| k.id().to_string()),
        }
    }
}
