//! Opaque recipe payload.

use serde::{Deserialize, Serialize};

/// The external pipeline definition handed to a backend launcher.
///
/// Opaque to the control plane: it is carried through `submit` untouched
/// and only the launcher interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Recipe(serde_json::Value);

impl Recipe {
    /// Wrap an external pipeline definition.
    #[must_use]
    pub fn new(payload: serde_json::Value) -> Self {
        Self(payload)
    }

    /// Borrow the raw payload.
    #[must_use]
    pub fn payload(&self) -> &serde_json::Value {
        &self.0
    }
}

impl From<serde_json::Value> for Recipe {
    fn from(payload: serde_json::Value) -> Self {
        Self(payload)
    }
}
