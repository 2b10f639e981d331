//! Form configuration repository trait.

use async_trait::async_trait;

use super::model::RegistroConfig;
use crate::RegistroError;

/// Repository trait for the configuration slot written by the configurator.
#[async_trait]
pub trait FormConfigRepository: Send + Sync {
    /// Loads the stored configuration.
    /// Returns `None` if nothing usable is stored.
    async fn load(&self) -> Result<Option<RegistroConfig>, RegistroError>;

    /// Replaces the stored configuration.
    async fn save(&self, config: &RegistroConfig) -> Result<(), RegistroError>;
}
