//! Registration repository over a JSON slot.
//!
//! The slot holds one JSON array of records:
//! `[{ "id", "nombre", "email", "sesiones", "fecha" }, ...]`.
//!
//! Reading never fails because of the slot contents: an absent slot and a
//! document that does not parse as that array are both read as an empty
//! sequence (see [`LoadFallback`]).

use async_trait::async_trait;
use std::sync::Arc;

use registro_core::RegistroError;
use registro_core::error::Result;
use registro_core::registration::{RegistrationRecord, RegistrationRepository};

use crate::storage::SlotStore;

/// Why a slot was read as an empty sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadFallback {
    /// The slot was never written, or holds only whitespace.
    Missing,
    /// The slot contents are not a sequence of registration records.
    Corrupt(String),
}

impl LoadFallback {
    fn log(&self, slot: &str) {
        match self {
            LoadFallback::Missing => {
                tracing::debug!("[Registrations] Slot '{}' is empty, starting fresh", slot)
            }
            LoadFallback::Corrupt(reason) => tracing::warn!(
                "[Registrations] Slot '{}' is unreadable, treating as empty: {}",
                slot,
                reason
            ),
        }
    }
}

/// Decodes raw slot contents into records.
pub fn decode_registrations(
    raw: Option<&[u8]>,
) -> std::result::Result<Vec<RegistrationRecord>, LoadFallback> {
    let bytes = match raw {
        Some(bytes) if !bytes.iter().all(u8::is_ascii_whitespace) => bytes,
        _ => return Err(LoadFallback::Missing),
    };

    serde_json::from_slice(bytes).map_err(|e| LoadFallback::Corrupt(e.to_string()))
}

/// Decodes slot contents applying the empty-sequence fallback.
pub(crate) fn decode_or_empty(raw: Option<&[u8]>, slot: &str) -> Vec<RegistrationRecord> {
    decode_registrations(raw).unwrap_or_else(|fallback| {
        fallback.log(slot);
        Vec::new()
    })
}

/// File-backed registration repository.
///
/// Each append re-reads the whole slot, adds the record and rewrites the
/// slot under an exclusive file lock.
pub struct JsonRegistrationRepository {
    store: Arc<SlotStore>,
    slot: String,
}

impl JsonRegistrationRepository {
    pub fn new(store: Arc<SlotStore>, slot: impl Into<String>) -> Self {
        Self {
            store,
            slot: slot.into(),
        }
    }

    pub fn slot(&self) -> &str {
        &self.slot
    }
}

#[async_trait]
impl RegistrationRepository for JsonRegistrationRepository {
    async fn load(&self) -> Result<Vec<RegistrationRecord>> {
        let store = self.store.clone();
        let slot = self.slot.clone();

        tokio::task::spawn_blocking(move || {
            let raw = store.read(&slot)?;
            Ok::<_, RegistroError>(decode_or_empty(raw.as_deref(), &slot))
        })
        .await
        .map_err(|e| RegistroError::internal(format!("Failed to join task: {}", e)))?
    }

    async fn append(&self, record: &RegistrationRecord) -> Result<()> {
        let store = self.store.clone();
        let slot = self.slot.clone();
        let record = record.clone();

        tokio::task::spawn_blocking(move || {
            store.update(&slot, |raw| {
                let mut records = decode_or_empty(raw.as_deref(), &slot);
                records.push(record);
                Ok(serde_json::to_vec(&records)?)
            })?;
            Ok::<(), RegistroError>(())
        })
        .await
        .map_err(|e| RegistroError::internal(format!("Failed to join task: {}", e)))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn repo(temp_dir: &TempDir) -> (Arc<SlotStore>, JsonRegistrationRepository) {
        let store = Arc::new(SlotStore::new(temp_dir.path().to_path_buf()));
        let repo = JsonRegistrationRepository::new(store.clone(), "registros");
        (store, repo)
    }

    #[test]
    fn test_decode_fallbacks() {
        assert_eq!(decode_registrations(None), Err(LoadFallback::Missing));
        assert_eq!(decode_registrations(Some(b"  \n".as_slice())), Err(LoadFallback::Missing));
        assert!(matches!(
            decode_registrations(Some(br#"{"not":"a list"}"#.as_slice())),
            Err(LoadFallback::Corrupt(_))
        ));
        assert!(matches!(
            decode_registrations(Some(br#"[{"id":1}]"#.as_slice())),
            Err(LoadFallback::Corrupt(_))
        ));
        assert!(matches!(
            decode_registrations(Some([0xffu8, 0xfe].as_slice())),
            Err(LoadFallback::Corrupt(_))
        ));
        assert_eq!(decode_registrations(Some(b"[]".as_slice())), Ok(Vec::new()));
    }

    #[tokio::test]
    async fn test_load_missing_slot_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let (_, repo) = repo(&temp_dir);

        assert!(repo.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_append_preserves_order() {
        let temp_dir = TempDir::new().unwrap();
        let (_, repo) = repo(&temp_dir);

        let records: Vec<_> = (0..3)
            .map(|i| RegistrationRecord::new(&format!("User {i}"), "u@x.com", Vec::new()))
            .collect();
        for record in &records {
            repo.append(record).await.unwrap();
        }

        assert_eq!(repo.load().await.unwrap(), records);
    }

    #[tokio::test]
    async fn test_corrupt_slot_reads_as_empty() {
        let temp_dir = TempDir::new().unwrap();
        let (store, repo) = repo(&temp_dir);
        store.write("registros", b"this is not json").unwrap();

        assert!(repo.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_append_over_corrupt_slot_starts_fresh() {
        let temp_dir = TempDir::new().unwrap();
        let (store, repo) = repo(&temp_dir);
        store.write("registros", b"[{\"broken\":").unwrap();

        let record = RegistrationRecord::new("Ana", "ana@x.com", Vec::new());
        repo.append(&record).await.unwrap();

        assert_eq!(repo.load().await.unwrap(), vec![record]);
    }

    #[tokio::test]
    async fn test_written_document_uses_wire_names() {
        let temp_dir = TempDir::new().unwrap();
        let (store, repo) = repo(&temp_dir);

        let record = RegistrationRecord::new("Ana", "ana@x.com", vec!["Seminario sobre IA".into()]);
        repo.append(&record).await.unwrap();

        let raw = store.read("registros").unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_slice(&raw).unwrap();
        assert_eq!(value[0]["nombre"], "Ana");
        assert_eq!(value[0]["sesiones"][0], "Seminario sobre IA");
        assert_eq!(value[0]["id"], record.id.as_str());
    }
}
