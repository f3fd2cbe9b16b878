//! Discard piles: one shared pile plus one private pile per participant.

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cards::CardState;
use crate::core::ParticipantId;

/// Destination of a discarded card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PileKind {
    /// The universal pile every participant discards onto.
    Shared,
    /// A participant's own pile.
    Private(ParticipantId),
}

impl PileKind {
    /// Resolve the `to_shared_pile` flag of a discard for `requester`.
    #[must_use]
    pub const fn for_discard(requester: ParticipantId, to_shared_pile: bool) -> Self {
        if to_shared_pile {
            PileKind::Shared
        } else {
            PileKind::Private(requester)
        }
    }

    #[must_use]
    pub const fn is_shared(self) -> bool {
        matches!(self, PileKind::Shared)
    }
}

/// Shared and per-participant discard piles.
///
/// Cards keep their last-known state when discarded.
#[derive(Clone, Debug, Default)]
pub struct DiscardEngine {
    shared: Vector<CardState>,
    private: FxHashMap<ParticipantId, Vector<CardState>>,
}

impl DiscardEngine {
    /// Create with all piles empty.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a card to a pile. Private piles are created on first use.
    pub fn discard(&mut self, card: CardState, pile: PileKind) {
        match pile {
            PileKind::Shared => self.shared.push_back(card),
            PileKind::Private(owner) => self.private.entry(owner).or_default().push_back(card),
        }
    }

    /// The shared pile, oldest first.
    #[must_use]
    pub fn shared(&self) -> &Vector<CardState> {
        &self.shared
    }

    /// A participant's private pile, if they ever discarded to it.
    #[must_use]
    pub fn private(&self, participant: ParticipantId) -> Option<&Vector<CardState>> {
        self.private.get(&participant)
    }

    /// Number of cards in a pile.
    #[must_use]
    pub fn pile_len(&self, pile: PileKind) -> usize {
        match pile {
            PileKind::Shared => self.shared.len(),
            PileKind::Private(owner) => self.private.get(&owner).map_or(0, Vector::len),
        }
    }

    /// Total cards across every pile.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.shared.len() + self.private.values().map(Vector::len).sum::<usize>()
    }

    /// Private piles in ascending participant order.
    #[must_use]
    pub fn private_piles(&self) -> Vec<(ParticipantId, Vector<CardState>)> {
        let mut piles: Vec<_> = self.private.iter().map(|(&id, pile)| (id, pile.clone())).collect();
        piles.sort_unstable_by_key(|(id, _)| *id);
        piles
    }

    /// Empty every pile.
    pub fn clear(&mut self) {
        self.shared.clear();
        self.private.clear();
    }
}
