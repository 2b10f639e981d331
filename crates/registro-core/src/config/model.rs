//! Form configuration domain models.

use serde::{Deserialize, Serialize};

/// Accent color used when the configuration carries no theme.
pub const DEFAULT_PRIMARY_COLOR: &str = "#1d4ed8";

/// Cosmetic theme of the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub primary_color: String,
}

/// Descriptor of one additional input.
///
/// `name` is the key of the value in the form state and must be unique within
/// a configuration. `input_type` is passed to the rendering layer untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub input_type: String,
    #[serde(default)]
    pub required: bool,
}

impl FieldSpec {
    /// Creates a new field descriptor.
    pub fn new(
        name: impl Into<String>,
        label: impl Into<String>,
        input_type: impl Into<String>,
        required: bool,
    ) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            input_type: input_type.into(),
            required,
        }
    }

    /// Optional company field offered by the configurator.
    pub fn company() -> Self {
        Self::new("empresa", "Empresa", "text", false)
    }

    /// Optional phone field offered by the configurator.
    pub fn phone() -> Self {
        Self::new("telefono", "Teléfono", "tel", false)
    }
}

/// Rendering and validation policy for one form session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormConfig {
    /// Whether the session selector is shown and at least one session is required.
    #[serde(default)]
    pub show_session_selector: bool,
    /// Additional inputs, in display order.
    #[serde(default)]
    pub extra_fields: Vec<FieldSpec>,
}

impl FormConfig {
    /// Creates a config with the given selector visibility and no extra fields.
    pub fn new(show_session_selector: bool) -> Self {
        Self {
            show_session_selector,
            extra_fields: Vec::new(),
        }
    }

    /// Adds an extra field at the end of the display order.
    pub fn with_field(mut self, field: FieldSpec) -> Self {
        self.extra_fields.push(field);
        self
    }

    /// Builds the configuration the way the configurator screen does:
    /// company first, then phone.
    pub fn from_toggles(show_session_selector: bool, ask_company: bool, ask_phone: bool) -> Self {
        let mut config = Self::new(show_session_selector);
        if ask_company {
            config.extra_fields.push(FieldSpec::company());
        }
        if ask_phone {
            config.extra_fields.push(FieldSpec::phone());
        }
        config
    }

    /// Looks up an extra field by name.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.extra_fields.iter().find(|f| f.name == name)
    }

    /// Names that appear more than once in `extra_fields`, in first-seen order.
    pub fn duplicate_field_names(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        let mut duplicates: Vec<&str> = Vec::new();
        for field in &self.extra_fields {
            let name = field.name.as_str();
            if seen.contains(&name) {
                if !duplicates.contains(&name) {
                    duplicates.push(name);
                }
            } else {
                seen.push(name);
            }
        }
        duplicates
    }
}

/// Configuration envelope as handed over by the configurator.
///
/// A missing `config` means the configuration is not available; the host
/// should not mount the form in that case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistroConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<FormConfig>,
}

impl RegistroConfig {
    /// Wraps a form configuration without a theme.
    pub fn new(config: FormConfig) -> Self {
        Self {
            theme: None,
            config: Some(config),
        }
    }

    /// Sets the theme accent color.
    pub fn with_primary_color(mut self, color: impl Into<String>) -> Self {
        self.theme = Some(Theme {
            primary_color: color.into(),
        });
        self
    }

    /// Theme accent, or `default` when the theme is absent or blank.
    pub fn primary_color_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.theme
            .as_ref()
            .map(|t| t.primary_color.as_str())
            .filter(|c| !c.is_empty())
            .unwrap_or(default)
    }
}
