//! The shared draw pile.
//!
//! Top of the deck is the end of the sequence. No validation lives here:
//! the authority bounds-checks before calling.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::CardState;
use crate::core::GameRng;

/// Ordered, server-owned stack of cards (top = last).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vector<CardState>,
}

impl Deck {
    /// Create an empty deck.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the contents with `deck_count` standard decks, face down and
    /// unowned, in suit-then-rank order.
    pub fn rebuild(&mut self, deck_count: usize) {
        self.cards.clear();
        for _ in 0..deck_count {
            self.cards.extend(CardState::standard_deck());
        }
    }

    /// Unbiased in-place Fisher-Yates shuffle.
    ///
    /// Walks `n` from the last index down to 1, swapping position `n` with a
    /// uniform index in `[0, n]`.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        for n in (1..self.cards.len()).rev() {
            let k = rng.index_inclusive(n);
            self.cards.swap(n, k);
        }
    }

    /// Put a card on top.
    pub fn push_top(&mut self, card: CardState) {
        self.cards.push_back(card);
    }

    /// Remove and return the top card.
    pub fn pop_top(&mut self) -> Option<CardState> {
        self.cards.pop_back()
    }

    /// Look at the top card without removing it.
    #[must_use]
    pub fn top(&self) -> Option<&CardState> {
        self.cards.back()
    }

    /// Number of cards remaining.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the deck is exhausted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Remove every card.
    pub fn clear(&mut self) {
        self.cards.clear();
    }

    /// Iterate bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = &CardState> {
        self.cards.iter()
    }

    /// The underlying persistent vector (cheap to clone).
    #[must_use]
    pub fn cards(&self) -> &Vector<CardState> {
        &self.cards
    }
}
