//! Application settings.
//!
//! Read from `config.toml` in the Registro config directory. Every field has
//! a default so a partial or missing file is valid.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::config::DEFAULT_PRIMARY_COLOR;

/// Slot holding the registration records.
pub const DEFAULT_REGISTRATIONS_SLOT: &str = "registros";
/// Slot holding the form configuration written by the configurator.
pub const DEFAULT_CONFIG_SLOT: &str = "registro-config";
/// How long the confirmation toast stays visible.
pub const DEFAULT_TOAST_DURATION_MS: u64 = 2500;

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub ui: UiSettings,
    #[serde(default)]
    pub logging: LogSettings,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct StorageSettings {
    /// Directory of the slot files. Defaults to the platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    #[serde(default = "default_registrations_slot")]
    pub registrations_slot: String,
    #[serde(default = "default_config_slot")]
    pub config_slot: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            data_dir: None,
            registrations_slot: default_registrations_slot(),
            config_slot: default_config_slot(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct UiSettings {
    #[serde(default = "default_toast_duration_ms")]
    pub toast_duration_ms: u64,
    #[serde(default = "default_primary_color")]
    pub default_primary_color: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            toast_duration_ms: default_toast_duration_ms(),
            default_primary_color: default_primary_color(),
        }
    }
}

impl UiSettings {
    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_duration_ms)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    /// Filter directive used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_registrations_slot() -> String {
    DEFAULT_REGISTRATIONS_SLOT.to_string()
}

fn default_config_slot() -> String {
    DEFAULT_CONFIG_SLOT.to_string()
}

fn default_toast_duration_ms() -> u64 {
    DEFAULT_TOAST_DURATION_MS
}

fn default_primary_color() -> String {
    DEFAULT_PRIMARY_COLOR.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}
