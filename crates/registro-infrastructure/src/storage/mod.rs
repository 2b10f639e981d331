//! Storage layer for atomic file operations.

mod atomic_toml;
mod atomic_write;
mod error;
mod slot_store;

pub use atomic_toml::AtomicTomlFile;
pub use error::StorageError;
pub use slot_store::SlotStore;
