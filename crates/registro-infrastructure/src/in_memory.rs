//! In-memory repositories.
//!
//! Behave like the JSON repositories, including the fallback for unreadable
//! contents, without touching the filesystem. Used by tests and by the
//! CLI's ephemeral mode.

use async_trait::async_trait;
use tokio::sync::Mutex;

use registro_core::config::{FormConfigRepository, RegistroConfig};
use registro_core::error::Result;
use registro_core::registration::{RegistrationRecord, RegistrationRepository};

use crate::json_form_config_repository::decode_config;
use crate::json_registration_repository::decode_or_empty;

const MEMORY_SLOT: &str = "memory";

/// Registration repository holding the serialized slot in memory.
#[derive(Default)]
pub struct InMemoryRegistrationRepository {
    raw: Mutex<Option<Vec<u8>>>,
}

impl InMemoryRegistrationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the slot with arbitrary text.
    pub fn with_raw(raw: impl Into<Vec<u8>>) -> Self {
        Self {
            raw: Mutex::new(Some(raw.into())),
        }
    }
}

#[async_trait]
impl RegistrationRepository for InMemoryRegistrationRepository {
    async fn load(&self) -> Result<Vec<RegistrationRecord>> {
        let raw = self.raw.lock().await;
        Ok(decode_or_empty(raw.as_deref(), MEMORY_SLOT))
    }

    async fn append(&self, record: &RegistrationRecord) -> Result<()> {
        let mut raw = self.raw.lock().await;
        let mut records = decode_or_empty(raw.as_deref(), MEMORY_SLOT);
        records.push(record.clone());
        *raw = Some(serde_json::to_vec(&records)?);
        Ok(())
    }
}

/// Form configuration repository holding the value in memory.
#[derive(Default)]
pub struct InMemoryFormConfigRepository {
    raw: Mutex<Option<Vec<u8>>>,
}

impl InMemoryFormConfigRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the slot with arbitrary text.
    pub fn with_raw(raw: impl Into<Vec<u8>>) -> Self {
        Self {
            raw: Mutex::new(Some(raw.into())),
        }
    }
}

#[async_trait]
impl FormConfigRepository for InMemoryFormConfigRepository {
    async fn load(&self) -> Result<Option<RegistroConfig>> {
        let raw = self.raw.lock().await;
        Ok(decode_config(raw.as_deref(), MEMORY_SLOT))
    }

    async fn save(&self, config: &RegistroConfig) -> Result<()> {
        *self.raw.lock().await = Some(serde_json::to_vec(config)?);
        Ok(())
    }
}
