//! Form state owned by the form engine.

use std::collections::{HashMap, HashSet};

use crate::catalog;
use crate::config::FormConfig;
use crate::error::{RegistroError, Result};

/// Key of an input of the form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldKey {
    Name,
    Email,
    Sessions,
    Extra(String),
}

impl FieldKey {
    /// Keys of the inputs that can block a submission, in focus order.
    pub const CORE: [FieldKey; 3] = [FieldKey::Name, FieldKey::Email, FieldKey::Sessions];

    /// Element id of the input as rendered.
    pub fn id(&self) -> &str {
        match self {
            FieldKey::Name => "name",
            FieldKey::Email => "email",
            FieldKey::Sessions => "sessions",
            FieldKey::Extra(name) => name,
        }
    }

    /// Parses a key typed by a user. Anything that is not a core key is taken
    /// as the name of an extra field.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "name" => FieldKey::Name,
            "email" => FieldKey::Email,
            "sessions" => FieldKey::Sessions,
            other => FieldKey::Extra(other.to_string()),
        }
    }
}

impl std::fmt::Display for FieldKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// Values typed by the user plus the set of touched inputs.
///
/// `touched` only grows until [`FormState::reset`] is called.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    name: String,
    email: String,
    sessions: Vec<String>,
    extra_values: HashMap<String, String>,
    touched: HashSet<FieldKey>,
}

impl FormState {
    /// Creates an empty state with one blank entry per configured extra field.
    pub fn for_config(config: Option<&FormConfig>) -> Self {
        let extra_values = config
            .map(|c| {
                c.extra_fields
                    .iter()
                    .map(|f| (f.name.clone(), String::new()))
                    .collect()
            })
            .unwrap_or_default();

        Self {
            extra_values,
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Selected sessions, in selection order.
    pub fn sessions(&self) -> &[String] {
        &self.sessions
    }

    /// Value of an extra field; empty when unset or unknown.
    pub fn extra(&self, name: &str) -> &str {
        self.extra_values.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn extra_values(&self) -> &HashMap<String, String> {
        &self.extra_values
    }

    pub fn set_name(&mut self, value: impl Into<String>) {
        self.name = value.into();
    }

    pub fn set_email(&mut self, value: impl Into<String>) {
        self.email = value.into();
    }

    /// Sets the value of a configured extra field.
    ///
    /// Fails for names that were not configured when the state was created.
    pub fn set_extra(&mut self, name: &str, value: impl Into<String>) -> Result<()> {
        match self.extra_values.get_mut(name) {
            Some(slot) => {
                *slot = value.into();
                Ok(())
            }
            None => Err(RegistroError::validation(format!(
                "unknown field '{}'",
                name
            ))),
        }
    }

    /// Selects a catalog session, or deselects it if already selected.
    ///
    /// Returns whether the session is selected afterwards.
    pub fn toggle_session(&mut self, session: &str) -> Result<bool> {
        if catalog::find(session).is_none() {
            return Err(RegistroError::validation(format!(
                "unknown session '{}'",
                session
            )));
        }

        if let Some(pos) = self.sessions.iter().position(|s| s == session) {
            self.sessions.remove(pos);
            Ok(false)
        } else {
            self.sessions.push(session.to_string());
            Ok(true)
        }
    }

    pub fn is_selected(&self, session: &str) -> bool {
        self.sessions.iter().any(|s| s == session)
    }

    /// Marks an input as interacted with.
    pub fn touch(&mut self, key: FieldKey) {
        self.touched.insert(key);
    }

    pub fn is_touched(&self, key: &FieldKey) -> bool {
        self.touched.contains(key)
    }

    pub fn any_touched(&self) -> bool {
        !self.touched.is_empty()
    }

    /// Restores every value to blank and forgets touched inputs.
    ///
    /// Configured extra fields keep their (now empty) entries.
    pub fn reset(&mut self) {
        self.name.clear();
        self.email.clear();
        self.sessions.clear();
        self.extra_values.values_mut().for_each(String::clear);
        self.touched.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FieldSpec;

    fn config() -> FormConfig {
        FormConfig::new(true)
            .with_field(FieldSpec::company())
            .with_field(FieldSpec::phone())
    }

    #[test]
    fn test_for_config_seeds_extra_values() {
        let state = FormState::for_config(Some(&config()));
        assert_eq!(state.extra_values().len(), 2);
        assert_eq!(state.extra("empresa"), "");
        assert_eq!(state.extra("telefono"), "");

        let bare = FormState::for_config(None);
        assert!(bare.extra_values().is_empty());
    }

    #[test]
    fn test_set_extra_rejects_unknown_names() {
        let mut state = FormState::for_config(Some(&config()));
        state.set_extra("empresa", "ACME").unwrap();
        assert_eq!(state.extra("empresa"), "ACME");

        let err = state.set_extra("fax", "123").unwrap_err();
        assert!(err.is_validation());
        assert!(!state.extra_values().contains_key("fax"));
    }

    #[test]
    fn test_toggle_session_keeps_selection_order() {
        let mut state = FormState::default();
        assert!(state.toggle_session("Iniciación a la Programación").unwrap());
        assert!(state.toggle_session("Seminario sobre IA").unwrap());
        assert_eq!(
            state.sessions(),
            &["Iniciación a la Programación".to_string(), "Seminario sobre IA".to_string()]
        );

        assert!(!state.toggle_session("Iniciación a la Programación").unwrap());
        assert_eq!(state.sessions(), &["Seminario sobre IA".to_string()]);
    }

    #[test]
    fn test_toggle_unknown_session_leaves_state_unchanged() {
        let mut state = FormState::default();
        let err = state.toggle_session("Cooking").unwrap_err();
        assert!(err.is_validation());
        assert!(state.sessions().is_empty());
    }

    #[test]
    fn test_reset_clears_values_and_touched() {
        let mut state = FormState::for_config(Some(&config()));
        state.set_name("Ana");
        state.set_email("ana@x.com");
        state.set_extra("telefono", "555").unwrap();
        state.toggle_session("Seminario sobre IA").unwrap();
        state.touch(FieldKey::Name);
        state.touch(FieldKey::Extra("telefono".into()));

        state.reset();

        assert_eq!(state, FormState::for_config(Some(&config())));
        assert!(!state.any_touched());
    }

    #[test]
    fn test_field_key_parse_round_trips_ids() {
        for key in FieldKey::CORE {
            assert_eq!(FieldKey::parse(key.id()), key);
        }
        assert_eq!(FieldKey::parse("empresa"), FieldKey::Extra("empresa".into()));
    }
}
