//! Domain layer for Registro.
//!
//! Holds the configuration model that drives the registration form, the
//! session catalog, the transient form state with its validation function,
//! and the persisted registration record together with the repository traits
//! the outer layers implement.

pub mod catalog;
pub mod config;
pub mod error;
pub mod form;
pub mod registration;
pub mod settings;

// Re-export common error type
pub use error::RegistroError;
