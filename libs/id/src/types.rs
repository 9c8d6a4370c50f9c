//! Event identifier type.

use crate::IdError;

// =============================================================================
// Events
// =============================================================================

/// Storage primary key of a persisted event.
///
/// Event IDs are plain integers handed out by the store. They are
/// deliberately excluded from every equality and hash computation on events,
/// so two records describing the same authentication compare equal no matter
/// which rows they were loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct EventId(i64);

impl EventId {
    /// The ID of an event that has not been stored yet.
    pub const UNASSIGNED: Self = Self(0);

    /// Creates a new EventId from an i64.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the underlying i64 value.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }

    /// Returns true if the store has assigned this ID.
    #[must_use]
    pub const fn is_assigned(&self) -> bool {
        self.0 != Self::UNASSIGNED.0
    }

    /// Parses an ID from its decimal string form.
    pub fn parse(s: &str) -> Result<Self, IdError> {
        if s.is_empty() {
            return Err(IdError::Empty);
        }

        s.parse::<i64>()
            .map(Self)
            .map_err(|e| IdError::InvalidFormat {
                message: format!("'{s}': {e}"),
            })
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for EventId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<i64> for EventId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<EventId> for i64 {
    fn from(id: EventId) -> Self {
        id.0
    }
}

impl serde::Serialize for EventId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_i64(self.0)
    }
}

impl<'de> serde::Deserialize<'de> for EventId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let id = i64::deserialize(deserializer)?;
        Ok(Self(id))
    }
}

// =============================================================================
// Tests
// =============================================================================
