//! Fixed catalog of event sessions.
//!
//! The catalog is hardcoded: three sessions, each bound to a display tag used
//! for visual grouping only.

use serde::{Deserialize, Serialize};

/// Display color tag for a session card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionTag {
    Indigo,
    Emerald,
    Amber,
}

impl SessionTag {
    /// Returns the tag name as used by the presentation layer.
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionTag::Indigo => "indigo",
            SessionTag::Emerald => "emerald",
            SessionTag::Amber => "amber",
        }
    }
}

impl std::fmt::Display for SessionTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A selectable session of the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogSession {
    pub name: &'static str,
    pub tag: SessionTag,
}

/// The sessions offered by the registration form, in display order.
pub const SESSION_CATALOG: [CatalogSession; 3] = [
    CatalogSession {
        name: "Seminario sobre IA",
        tag: SessionTag::Indigo,
    },
    CatalogSession {
        name: "Taller de Programación Competitiva",
        tag: SessionTag::Emerald,
    },
    CatalogSession {
        name: "Iniciación a la Programación",
        tag: SessionTag::Amber,
    },
];

/// Returns the full catalog.
pub fn catalog() -> &'static [CatalogSession] {
    &SESSION_CATALOG
}

/// Finds a session by its exact name.
pub fn find(name: &str) -> Option<&'static CatalogSession> {
    SESSION_CATALOG.iter().find(|s| s.name == name)
}

/// Finds a session by its 1-based position in the catalog.
pub fn by_index(index: usize) -> Option<&'static CatalogSession> {
    index.checked_sub(1).and_then(|i| SESSION_CATALOG.get(i))
}

/// Returns the display tag of a session name, if it belongs to the catalog.
pub fn tag_of(name: &str) -> Option<SessionTag> {
    find(name).map(|s| s.tag)
}
