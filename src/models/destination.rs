//! Saved destination records owned by a user

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Month;

/// Store-assigned identifier of a saved destination
pub type DestinationId = u64;

/// Opaque identifier supplied by the identity provider
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

impl UserId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A destination a user saved for a given month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedDestination {
    pub id: DestinationId,
    pub owner_id: UserId,
    pub region: String,
    pub month: Month,
    /// Temperature string copied from the dataset when the record was saved
    pub temperature: String,
    pub visited: bool,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a saved destination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDestination {
    pub owner_id: UserId,
    pub region: String,
    pub month: Month,
    pub temperature: String,
}

/// Change applied to a stored record.
/// Stores apply it while holding their write lock, so a toggle always
/// sees the latest value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DestinationUpdate {
    SetVisited(bool),
    ToggleVisited,
}

impl DestinationUpdate {
    pub fn apply(self, record: &mut SavedDestination) {
        record.visited = match self {
            Self::SetVisited(visited) => visited,
            Self::ToggleVisited => !record.visited,
        };
    }
}

impl SavedDestination {
    /// Build the stored record for a new destination
    #[must_use]
    pub fn from_new(id: DestinationId, new: NewDestination, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            owner_id: new.owner_id,
            region: new.region,
            month: new.month,
            temperature: new.temperature,
            visited: false,
            created_at,
        }
    }

    /// Most recent first; ids break ties between records created in the same instant
    pub fn sort_newest_first(destinations: &mut [SavedDestination]) {
        destinations.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
    }
}
