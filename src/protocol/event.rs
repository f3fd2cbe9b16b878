//! Replication events: one-way notices from the authority to observers.
//!
//! Every event describes a state change that has already been committed.
//! `Envelope` pairs an event with its audience; `Outbox` collects the
//! envelopes one operation produced, in emission order.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{CardState, VisualHandle};
use crate::core::ParticipantId;

/// A completed state change, as observers see it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReplicationEvent {
    /// A card entered `participant`'s hand.
    HandUpdated { participant: ParticipantId, card: CardState },
    /// A card left `participant`'s hand for a discard pile.
    DiscardUpdated {
        participant: ParticipantId,
        card: CardState,
        to_shared_pile: bool,
    },
    /// The visual for a card should move to a discard pile.
    CardPositionChanged { visual: VisualHandle, to_shared_pile: bool },
    /// A card's state changed in place (e.g. flipped).
    CardStateChanged { card: CardState },
    /// `participant` now holds the turn.
    TurnChanged { participant: ParticipantId },
}

impl ReplicationEvent {
    /// The card carried by this event, if any.
    #[must_use]
    pub fn card(&self) -> Option<&CardState> {
        match self {
            ReplicationEvent::HandUpdated { card, .. }
            | ReplicationEvent::DiscardUpdated { card, .. }
            | ReplicationEvent::CardStateChanged { card } => Some(card),
            ReplicationEvent::CardPositionChanged { .. } | ReplicationEvent::TurnChanged { .. } => None,
        }
    }

    /// Short name for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            ReplicationEvent::HandUpdated { .. } => "HandUpdated",
            ReplicationEvent::DiscardUpdated { .. } => "DiscardUpdated",
            ReplicationEvent::CardPositionChanged { .. } => "CardPositionChanged",
            ReplicationEvent::CardStateChanged { .. } => "CardStateChanged",
            ReplicationEvent::TurnChanged { .. } => "TurnChanged",
        }
    }
}

/// Who receives an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Audience {
    /// Every connected participant.
    All,
    /// One participant.
    Only(ParticipantId),
}

impl Audience {
    /// Check whether `participant` receives events with this audience.
    #[must_use]
    pub fn includes(self, participant: ParticipantId) -> bool {
        match self {
            Audience::All => true,
            Audience::Only(target) => target == participant,
        }
    }
}

/// An event addressed to its audience.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Envelope {
    pub audience: Audience,
    pub event: ReplicationEvent,
}

impl Envelope {
    /// Address an event to everyone.
    #[must_use]
    pub const fn to_all(event: ReplicationEvent) -> Self {
        Self {
            audience: Audience::All,
            event,
        }
    }

    /// Address an event to one participant.
    #[must_use]
    pub const fn to_only(participant: ParticipantId, event: ReplicationEvent) -> Self {
        Self {
            audience: Audience::Only(participant),
            event,
        }
    }
}

/// Envelopes produced by one operation, in order.
///
/// SmallVec keeps the common 1-2 event case off the heap; bulk deals spill.
pub type Outbox = SmallVec<[Envelope; 2]>;
