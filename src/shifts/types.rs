//! Shift resource types

use serde::{Deserialize, Serialize};

/// A named time interval, as returned by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shift {
    /// Server-assigned identifier (string form of a UUID)
    pub id: String,

    /// Human-readable label
    pub name: String,

    /// Start time of day, e.g. `"06:00:00"`
    pub start_time: String,

    /// End time of day, e.g. `"14:00:00"`
    pub end_time: String,
}

/// A shift that has not been created yet and so carries no id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewShift {
    /// Human-readable label
    pub name: String,

    /// Start time of day
    pub start_time: String,

    /// End time of day
    pub end_time: String,
}

impl NewShift {
    /// Create a new draft
    pub fn new(name: &str, start_time: &str, end_time: &str) -> Self {
        Self {
            name: name.to_string(),
            start_time: start_time.to_string(),
            end_time: end_time.to_string(),
        }
    }
}

impl Shift {
    /// Attach an id to a draft
    pub fn from_draft(id: &str, draft: NewShift) -> Self {
        Self {
            id: id.to_string(),
            name: draft.name,
            start_time: draft.start_time,
            end_time: draft.end_time,
        }
    }

    /// Everything but the id
    pub fn draft(&self) -> NewShift {
        NewShift {
            name: self.name.clone(),
            start_time: self.start_time.clone(),
            end_time: self.end_time.clone(),
        }
    }
}
