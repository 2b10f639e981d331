//! Registration record model.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One completed registration.
///
/// Serialized with the field names of the persisted slot
/// (`nombre`, `sesiones`, `fecha`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationRecord {
    /// Unique identifier (UUID v4)
    pub id: String,
    /// Attendee name, trimmed
    #[serde(rename = "nombre")]
    pub name: String,
    /// Attendee email, trimmed
    pub email: String,
    /// Selected sessions at submit time, in selection order
    #[serde(rename = "sesiones")]
    pub sessions: Vec<String>,
    /// Submission timestamp (ISO 8601, UTC, millisecond precision)
    #[serde(rename = "fecha")]
    pub submitted_at: String,
}

impl RegistrationRecord {
    /// Creates a record with a fresh id and the current time.
    ///
    /// Name and email are trimmed; the caller is responsible for having
    /// validated them.
    pub fn new(name: &str, email: &str, sessions: Vec<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            sessions,
            submitted_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}
