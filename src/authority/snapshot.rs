//! Read-only copy of the whole table.
//!
//! Piles are `im` vectors, so taking a snapshot costs O(participants)
//! regardless of how many cards are on the table. Snapshots are taken
//! between commands, never mid-mutation.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::CardState;
use crate::core::ParticipantId;

/// Deck, hands, and discard piles at one point in time.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSnapshot {
    /// Bottom to top.
    pub deck: Vector<CardState>,
    /// Hands in ascending participant order.
    pub hands: Vec<(ParticipantId, Vector<CardState>)>,
    pub shared_pile: Vector<CardState>,
    /// Private discard piles in ascending participant order.
    pub private_piles: Vec<(ParticipantId, Vector<CardState>)>,
    /// Number of successful deck initializations so far.
    #[serde(default)]
    pub generation: u64,
}

impl TableSnapshot {
    /// A participant's hand, if they have one.
    #[must_use]
    pub fn hand(&self, participant: ParticipantId) -> Option<&Vector<CardState>> {
        self.hands.iter().find(|(id, _)| *id == participant).map(|(_, cards)| cards)
    }

    /// A participant's private discard pile, if they have one.
    #[must_use]
    pub fn private_pile(&self, participant: ParticipantId) -> Option<&Vector<CardState>> {
        self.private_piles
            .iter()
            .find(|(id, _)| *id == participant)
            .map(|(_, cards)| cards)
    }

    /// Every card on the table, wherever it is.
    pub fn all_cards(&self) -> impl Iterator<Item = &CardState> {
        self.deck
            .iter()
            .chain(self.hands.iter().flat_map(|(_, cards)| cards.iter()))
            .chain(self.shared_pile.iter())
            .chain(self.private_piles.iter().flat_map(|(_, cards)| cards.iter()))
    }

    /// Total cards on the table.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.deck.len()
            + self.hands.iter().map(|(_, c)| c.len()).sum::<usize>()
            + self.shared_pile.len()
            + self.private_piles.iter().map(|(_, c)| c.len()).sum::<usize>()
    }
}
