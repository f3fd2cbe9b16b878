//! Commands participants send to the authority.
//!
//! The sender is attached by the transport; it is never a field of the
//! command, so a participant cannot act on someone else's behalf.

use serde::{Deserialize, Serialize};

/// A participant intent, one per action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    /// Rebuild the deck from `deck_count` standard decks and shuffle.
    /// Clears every hand and discard pile.
    InitializeDeck { deck_count: u32 },
    /// Permute the deck.
    Shuffle,
    /// Deal up to `cards_per_participant` to each connected participant.
    DealInitialHands { cards_per_participant: u32 },
    /// Move the top of the deck into the sender's hand.
    DrawCard,
    /// Move a card from the sender's hand to a discard pile.
    DiscardCard { hand_index: u32, to_shared_pile: bool },
    /// Toggle visibility of a card in the sender's hand.
    FlipCard { hand_index: u32 },
    /// Pass the turn. Only the current participant may.
    EndTurn,
}

impl Command {
    /// Session setup commands (not per-turn actions).
    #[must_use]
    pub const fn is_setup(&self) -> bool {
        matches!(
            self,
            Command::InitializeDeck { .. } | Command::Shuffle | Command::DealInitialHands { .. }
        )
    }

    /// Card actions subject to `TurnGating`.
    #[must_use]
    pub const fn is_card_action(&self) -> bool {
        matches!(
            self,
            Command::DrawCard | Command::DiscardCard { .. } | Command::FlipCard { .. }
        )
    }

    /// Short name for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Command::InitializeDeck { .. } => "InitializeDeck",
            Command::Shuffle => "Shuffle",
            Command::DealInitialHands { .. } => "DealInitialHands",
            Command::DrawCard => "DrawCard",
            Command::DiscardCard { .. } => "DiscardCard",
            Command::FlipCard { .. } => "FlipCard",
            Command::EndTurn => "EndTurn",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert!(Command::InitializeDeck { deck_count: 1 }.is_setup());
        assert!(Command::Shuffle.is_setup());
        assert!(Command::DealInitialHands { cards_per_participant: 5 }.is_setup());
        assert!(!Command::DrawCard.is_setup());
        assert!(!Command::EndTurn.is_setup());

        assert!(Command::DrawCard.is_card_action());
        assert!(Command::DiscardCard { hand_index: 0, to_shared_pile: true }.is_card_action());
        assert!(Command::FlipCard { hand_index: 0 }.is_card_action());
        assert!(!Command::EndTurn.is_card_action());
        assert!(!Command::Shuffle.is_card_action());
    }

    #[test]
    fn test_names() {
        assert_eq!(Command::EndTurn.name(), "EndTurn");
        assert_eq!(Command::FlipCard { hand_index: 2 }.name(), "FlipCard");
    }

    #[test]
    fn test_serialization() {
        let cmd = Command::DiscardCard { hand_index: 3, to_shared_pile: false };
        let json = serde_json::to_string(&cmd).unwrap();
        let back: Command = serde_json::from_str(&json).unwrap();
        assert_eq!(cmd, back);
    }
}
