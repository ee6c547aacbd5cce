//! Program combination model

use serde::{Deserialize, Serialize};

/// A subject combination (program stream) students can follow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combination {
    /// Display name (e.g., "Mathematics, Physics & Computer Science")
    pub name: String,

    /// Short description shown alongside the subject list
    #[serde(default)]
    pub description: String,
}

impl Combination {
    /// Create a new combination
    #[must_use]
    pub const fn new(name: String, description: String) -> Self {
        Self { name, description }
    }
}
