//! Registration record domain model and repository trait.
//!
//! A registration is created once per successful submission and never
//! changed afterwards.

mod model;
mod repository;

pub use model::RegistrationRecord;
pub use repository::RegistrationRepository;
