//! Registration repository trait.

use async_trait::async_trait;

use super::model::RegistrationRecord;
use crate::RegistroError;

/// Append-only store of registration records.
///
/// Implementations must treat an absent or unreadable store as an empty
/// sequence on `load` instead of returning an error.
#[async_trait]
pub trait RegistrationRepository: Send + Sync {
    /// Loads every stored registration in submission order.
    async fn load(&self) -> Result<Vec<RegistrationRecord>, RegistroError>;

    /// Appends a registration at the end of the stored sequence.
    async fn append(&self, record: &RegistrationRecord) -> Result<(), RegistroError>;
}
