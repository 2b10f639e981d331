//! Accessible view model of the registration form.
//!
//! A [`FormView`] is a snapshot: it holds everything a surface needs to draw
//! the form (labels, values, visible errors, ARIA attributes, live-region
//! text) and nothing it needs to change it.

use serde::Serialize;

use registro_core::catalog::{self, SessionTag};
use registro_core::config::FieldSpec;
use registro_core::form::{FieldKey, FormErrors, FormState};

pub const TITLE: &str = "Attendee registration";
pub const SUBTITLE: &str = "Fields marked with * are required.";
pub const SESSIONS_LEGEND: &str = "Sessions";
pub const NAME_HELP: &str = "As it appears on your badge.";
pub const EMAIL_HELP: &str = "We will use this email to confirm your place.";
pub const SESSIONS_HELP: &str = "Select one or more to attend.";
/// Live-region text announced while the confirmation toast is visible.
pub const STATUS_COMPLETED: &str = "Registration completed";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldView {
    pub id: String,
    pub label: String,
    pub input_type: String,
    pub required: bool,
    pub value: String,
    pub placeholder: Option<&'static str>,
    pub autocomplete: Option<&'static str>,
    pub aria_invalid: bool,
    /// Id of the error element, set only while the error is visible.
    pub described_by: Option<String>,
    pub error: Option<&'static str>,
    /// Help text, shown when there is no visible error.
    pub help: Option<&'static str>,
}

impl FieldView {
    fn core(
        key: &FieldKey,
        label: &str,
        input_type: &str,
        value: &str,
        visible_error: Option<&'static str>,
        help: &'static str,
    ) -> Self {
        Self {
            id: key.id().to_string(),
            label: label.to_string(),
            input_type: input_type.to_string(),
            required: true,
            value: value.to_string(),
            placeholder: None,
            autocomplete: None,
            aria_invalid: visible_error.is_some(),
            described_by: visible_error.map(|_| error_id(key)),
            error: visible_error,
            help: visible_error.is_none().then_some(help),
        }
    }

    pub(crate) fn name(state: &FormState, visible_error: Option<&'static str>) -> Self {
        Self {
            placeholder: Some("Your name"),
            ..Self::core(
                &FieldKey::Name,
                "Name",
                "text",
                state.name(),
                visible_error,
                NAME_HELP,
            )
        }
    }

    pub(crate) fn email(state: &FormState, visible_error: Option<&'static str>) -> Self {
        Self {
            placeholder: Some("you@email.com"),
            autocomplete: Some("email"),
            ..Self::core(
                &FieldKey::Email,
                "Email",
                "email",
                state.email(),
                visible_error,
                EMAIL_HELP,
            )
        }
    }

    /// Extra fields never carry an error or help text.
    pub(crate) fn extra(spec: &FieldSpec, state: &FormState) -> Self {
        Self {
            id: spec.name.clone(),
            label: spec.label.clone(),
            input_type: spec.input_type.clone(),
            required: spec.required,
            value: state.extra(&spec.name).to_string(),
            placeholder: None,
            autocomplete: None,
            aria_invalid: false,
            described_by: None,
            error: None,
            help: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionCardView {
    pub label: &'static str,
    pub tag: SessionTag,
    pub checked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSelectorView {
    pub legend: &'static str,
    pub cards: Vec<SessionCardView>,
    pub invalid: bool,
    pub error: Option<&'static str>,
    pub help: Option<&'static str>,
}

impl SessionSelectorView {
    pub(crate) fn new(state: &FormState, visible_error: Option<&'static str>) -> Self {
        let cards = catalog::catalog()
            .iter()
            .map(|session| SessionCardView {
                label: session.name,
                tag: session.tag,
                checked: state.is_selected(session.name),
            })
            .collect();

        Self {
            legend: SESSIONS_LEGEND,
            cards,
            invalid: visible_error.is_some(),
            error: visible_error,
            help: visible_error.is_none().then_some(SESSIONS_HELP),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormView {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub primary_color: String,
    /// Name, email, then the configured extra fields in declaration order.
    pub fields: Vec<FieldView>,
    pub sessions: Option<SessionSelectorView>,
    pub submit_disabled: bool,
    /// Polite live-region text.
    pub status: &'static str,
    pub toast: Option<String>,
    /// Input that should hold keyboard focus after a rejected submission.
    pub focus: Option<String>,
}

impl FormView {
    pub fn field(&self, id: &str) -> Option<&FieldView> {
        self.fields.iter().find(|f| f.id == id)
    }
}

/// Id of the element describing `key`'s error.
pub fn error_id(key: &FieldKey) -> String {
    format!("err-{}", key.id())
}

/// Errors of `errors` restricted to the inputs in the touched set.
pub(crate) fn visible(
    errors: &FormErrors,
    state: &FormState,
    key: &FieldKey,
) -> Option<&'static str> {
    if state.is_touched(key) {
        errors.get(key)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use registro_core::form::{NAME_REQUIRED, validate};

    #[test]
    fn test_untouched_field_shows_help() {
        let state = FormState::default();
        let errors = validate(&state, None);
        let field = FieldView::name(&state, visible(&errors, &state, &FieldKey::Name));

        assert_eq!(field.error, None);
        assert!(!field.aria_invalid);
        assert_eq!(field.described_by, None);
        assert_eq!(field.help, Some(NAME_HELP));
    }

    #[test]
    fn test_touched_invalid_field_describes_error() {
        let mut state = FormState::default();
        state.touch(FieldKey::Name);
        let errors = validate(&state, None);
        let field = FieldView::name(&state, visible(&errors, &state, &FieldKey::Name));

        assert_eq!(field.error, Some(NAME_REQUIRED));
        assert!(field.aria_invalid);
        assert_eq!(field.described_by.as_deref(), Some("err-name"));
        assert_eq!(field.help, None);
    }

    #[test]
    fn test_selector_lists_catalog_in_order() {
        let mut state = FormState::default();
        state.toggle_session("Iniciación a la Programación").unwrap();

        let selector = SessionSelectorView::new(&state, None);
        let labels: Vec<_> = selector.cards.iter().map(|c| c.label).collect();
        assert_eq!(
            labels,
            vec![
                "Seminario sobre IA",
                "Taller de Programación Competitiva",
                "Iniciación a la Programación",
            ]
        );
        assert!(!selector.cards[0].checked);
        assert!(selector.cards[2].checked);
        assert_eq!(selector.cards[2].tag, SessionTag::Amber);
        assert_eq!(selector.help, Some(SESSIONS_HELP));
    }

    #[test]
    fn test_extra_field_mirrors_descriptor() {
        let state = FormState::default();
        let spec = FieldSpec::phone();
        let field = FieldView::extra(&spec, &state);

        assert_eq!(field.id, "telefono");
        assert_eq!(field.input_type, "tel");
        assert_eq!(field.value, "");
        assert!(!field.required);
    }
}
