/// Identifier types shared across the domain layer

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Session-scoped identifier for a habit
///
/// The flat persisted format carries no identity, so ids are assigned when a
/// habit is created or loaded and live only as long as the session. Callers
/// address habits by id rather than list position so that deletes and edits
/// cannot hit the wrong entry after the list shifts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HabitId(pub Uuid);

impl HabitId {
    /// Generate a new random habit ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a habit ID handed back by a client
    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s.trim())?))
    }

    /// First eight characters, for compact display
    pub fn short(&self) -> String {
        self.0.simple().to_string()[..8].to_string()
    }
}

impl Default for HabitId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for HabitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
