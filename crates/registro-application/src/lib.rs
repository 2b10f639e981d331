//! Application layer for Registro.
//!
//! This crate provides the form engine that coordinates the domain model with
//! an injected registration repository, the confirmation toast, the
//! accessible view model of the form, and the host-side mount boundary.

pub mod boundary;
pub mod configurator;
pub mod form_engine;
pub mod toast;
pub mod view;

pub use boundary::{FormHost, Mount, MountError, Surface};
pub use configurator::{ConfiguratorChoices, ConfiguratorService};
pub use form_engine::{RegistrationForm, SubmitOutcome, SUCCESS_MESSAGE};
pub use toast::ToastNotifier;
pub use view::{FieldView, FormView, SessionCardView, SessionSelectorView};
