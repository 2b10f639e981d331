pub mod config_service;
pub mod in_memory;
pub mod json_form_config_repository;
pub mod json_registration_repository;
pub mod paths;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::in_memory::{InMemoryFormConfigRepository, InMemoryRegistrationRepository};
pub use crate::json_form_config_repository::JsonFormConfigRepository;
pub use crate::json_registration_repository::JsonRegistrationRepository;
