//! Transient form state and its validation.

mod state;
mod validation;

pub use state::{FieldKey, FormState};
pub use validation::{
    EMAIL_INVALID, EMAIL_REQUIRED, FormErrors, NAME_REQUIRED, SESSIONS_REQUIRED, is_valid_email,
    validate,
};
