//! Form configuration models and repository trait.
//!
//! The configuration is produced by an external configurator and handed to
//! the form at mount time. It decides which optional inputs are shown.

mod model;
mod repository;

pub use model::{DEFAULT_PRIMARY_COLOR, FieldSpec, FormConfig, RegistroConfig, Theme};
pub use repository::FormConfigRepository;
