//! Validation of the form state.
//!
//! Errors are always computed from the current state and configuration;
//! whether they are shown is decided by the touched set.

use once_cell::sync::Lazy;
use regex::Regex;

use super::state::{FieldKey, FormState};
use crate::config::FormConfig;

pub const NAME_REQUIRED: &str = "Name is required.";
pub const EMAIL_REQUIRED: &str = "Email is required.";
pub const EMAIL_INVALID: &str = "Enter a valid email.";
pub const SESSIONS_REQUIRED: &str = "Select at least one session.";

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// Whether `value` has the `local@domain.tld` shape.
///
/// The raw value is matched, so surrounding whitespace makes it invalid.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// Validation result for the inputs that can block a submission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormErrors {
    pub name: Option<&'static str>,
    pub email: Option<&'static str>,
    pub sessions: Option<&'static str>,
}

impl FormErrors {
    /// Error of the given input. Extra fields never carry one.
    pub fn get(&self, key: &FieldKey) -> Option<&'static str> {
        match key {
            FieldKey::Name => self.name,
            FieldKey::Email => self.email,
            FieldKey::Sessions => self.sessions,
            FieldKey::Extra(_) => None,
        }
    }

    pub fn has_errors(&self) -> bool {
        self.name.is_some() || self.email.is_some() || self.sessions.is_some()
    }

    /// First invalid input in the order name, email, sessions.
    pub fn first_invalid(&self) -> Option<FieldKey> {
        FieldKey::CORE.into_iter().find(|key| self.get(key).is_some())
    }
}

/// Computes the errors of `state` under `config`.
///
/// A missing configuration behaves like one with no session requirement.
/// Extra fields are not checked, even when declared required.
pub fn validate(state: &FormState, config: Option<&FormConfig>) -> FormErrors {
    let name = state.name().trim().is_empty().then_some(NAME_REQUIRED);

    let email = if state.email().trim().is_empty() {
        Some(EMAIL_REQUIRED)
    } else if !is_valid_email(state.email()) {
        Some(EMAIL_INVALID)
    } else {
        None
    };

    let show_sessions = config.is_some_and(|c| c.show_session_selector);
    let sessions = (show_sessions && state.sessions().is_empty()).then_some(SESSIONS_REQUIRED);

    FormErrors {
        name,
        email,
        sessions,
    }
}
