//! Form configuration repository over a JSON slot.
//!
//! Stores the document produced by the configurator:
//! `{ "theme": { "primaryColor" }, "config": { "showSessionSelector", "extraFields" } }`.

use async_trait::async_trait;
use std::sync::Arc;

use registro_core::RegistroError;
use registro_core::config::{FormConfigRepository, RegistroConfig};
use registro_core::error::Result;

use crate::storage::SlotStore;

/// Decodes raw slot contents; unreadable documents count as absent.
pub(crate) fn decode_config(raw: Option<&[u8]>, slot: &str) -> Option<RegistroConfig> {
    let bytes = raw?;
    match serde_json::from_slice(bytes) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!(
                "[FormConfig] Slot '{}' is unreadable, treating as absent: {}",
                slot,
                e
            );
            None
        }
    }
}

/// File-backed form configuration repository.
pub struct JsonFormConfigRepository {
    store: Arc<SlotStore>,
    slot: String,
}

impl JsonFormConfigRepository {
    pub fn new(store: Arc<SlotStore>, slot: impl Into<String>) -> Self {
        Self {
            store,
            slot: slot.into(),
        }
    }
}

#[async_trait]
impl FormConfigRepository for JsonFormConfigRepository {
    async fn load(&self) -> Result<Option<RegistroConfig>> {
        let store = self.store.clone();
        let slot = self.slot.clone();

        tokio::task::spawn_blocking(move || {
            let raw = store.read(&slot)?;
            Ok::<_, RegistroError>(decode_config(raw.as_deref(), &slot))
        })
        .await
        .map_err(|e| RegistroError::internal(format!("Failed to join task: {}", e)))?
    }

    async fn save(&self, config: &RegistroConfig) -> Result<()> {
        let serialized = serde_json::to_vec_pretty(config)?;
        let store = self.store.clone();
        let slot = self.slot.clone();

        tokio::task::spawn_blocking(move || {
            store.write(&slot, &serialized)?;
            Ok::<(), RegistroError>(())
        })
        .await
        .map_err(|e| RegistroError::internal(format!("Failed to join task: {}", e)))?
    }
}
