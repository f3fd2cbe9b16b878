//! Participant identification.
//!
//! ## ParticipantId
//!
//! Opaque identifier assigned by the transport to each connected player.
//! The value `0` is reserved: a card whose owner is `ParticipantId::UNOWNED`
//! is not held by anyone (it is in the deck, or was never dealt).

use serde::{Deserialize, Serialize};

/// Opaque participant identifier.
///
/// The authority never interprets the value beyond equality and the
/// reserved `UNOWNED` sentinel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ParticipantId(pub u64);

impl ParticipantId {
    /// Owner value carried by cards that no participant holds.
    pub const UNOWNED: Self = Self(0);

    /// Create a new participant ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Check whether this is the reserved "no owner" value.
    #[must_use]
    pub const fn is_unowned(self) -> bool {
        self.0 == 0
    }
}

impl From<u64> for ParticipantId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_unowned() {
            write!(f, "Unowned")
        } else {
            write!(f, "Participant {}", self.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_participant_id_basics() {
        let p = ParticipantId::new(7);

        assert_eq!(p.raw(), 7);
        assert!(!p.is_unowned());
        assert_eq!(format!("{}", p), "Participant 7");
    }

    #[test]
    fn test_unowned_sentinel() {
        assert!(ParticipantId::UNOWNED.is_unowned());
        assert_eq!(ParticipantId::default(), ParticipantId::UNOWNED);
        assert_eq!(format!("{}", ParticipantId::UNOWNED), "Unowned");
    }

    #[test]
    fn test_from_u64() {
        let p: ParticipantId = 42u64.into();
        assert_eq!(p, ParticipantId(42));
    }

    #[test]
    fn test_serialization() {
        let id = ParticipantId::new(123);
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: ParticipantId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
