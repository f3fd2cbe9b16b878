//! Per-participant hands.
//!
//! A `Hand` is an ordered sequence of cards owned by one participant.
//! `Hands` maps participants to their hand and creates hands lazily on the
//! first card dealt. Updates go through `replace`, which writes the whole
//! value back at its index.

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cards::CardState;
use crate::core::ParticipantId;

/// Ordered cards held by one participant.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    cards: Vector<CardState>,
}

impl Hand {
    /// Create an empty hand.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a card.
    pub fn push(&mut self, card: CardState) {
        self.cards.push_back(card);
    }

    /// Remove the card at `index`, keeping the order of the rest.
    ///
    /// Panics if `index` is out of bounds.
    pub fn remove(&mut self, index: usize) -> CardState {
        self.cards.remove(index)
    }

    /// Overwrite the card at `index`, returning the previous value.
    ///
    /// Panics if `index` is out of bounds.
    pub fn replace(&mut self, index: usize, card: CardState) -> CardState {
        self.cards.set(index, card)
    }

    /// Get the card at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&CardState> {
        self.cards.get(index)
    }

    /// Number of cards held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate in hand order.
    pub fn iter(&self) -> impl Iterator<Item = &CardState> {
        self.cards.iter()
    }

    /// The underlying persistent vector (cheap to clone).
    #[must_use]
    pub fn cards(&self) -> &Vector<CardState> {
        &self.cards
    }
}

/// All hands, keyed by participant.
#[derive(Clone, Debug, Default)]
pub struct Hands {
    hands: FxHashMap<ParticipantId, Hand>,
}

impl Hands {
    /// Create with no hands.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a participant's hand, if one was ever created.
    #[must_use]
    pub fn get(&self, participant: ParticipantId) -> Option<&Hand> {
        self.hands.get(&participant)
    }

    /// Get a participant's hand mutably, if one exists.
    pub fn get_mut(&mut self, participant: ParticipantId) -> Option<&mut Hand> {
        self.hands.get_mut(&participant)
    }

    /// Get a participant's hand, creating an empty one on first use.
    pub fn entry(&mut self, participant: ParticipantId) -> &mut Hand {
        self.hands.entry(participant).or_default()
    }

    /// Number of cards a participant holds (0 if no hand exists).
    #[must_use]
    pub fn len_of(&self, participant: ParticipantId) -> usize {
        self.hands.get(&participant).map_or(0, Hand::len)
    }

    /// Participants with a hand, in ascending id order.
    #[must_use]
    pub fn participants(&self) -> Vec<ParticipantId> {
        let mut ids: Vec<_> = self.hands.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Total cards across all hands.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.hands.values().map(Hand::len).sum()
    }

    /// Drop every hand.
    pub fn clear(&mut self) {
        self.hands.clear();
    }

    /// Iterate `(participant, hand)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (ParticipantId, &Hand)> {
        self.hands.iter().map(|(&id, hand)| (id, hand))
    }
}
