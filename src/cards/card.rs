//! Card state: the replicated value record for one playing card.

use serde::{Deserialize, Serialize};

use crate::core::ParticipantId;

/// Lowest rank (ace).
pub const MIN_RANK: u8 = 1;
/// Highest rank (king).
pub const MAX_RANK: u8 = 13;
/// Number of suits in a standard deck.
pub const SUIT_COUNT: u8 = 4;
/// Cards in one standard deck.
pub const CARDS_PER_DECK: usize = (MAX_RANK as usize) * (SUIT_COUNT as usize);

/// Opaque reference to the replicated visual instance of a card.
///
/// Assigned by the authority when a card becomes observable (dealt or
/// drawn). From then on it is the card's stable identity: flips and moves
/// keep the same handle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VisualHandle(pub u64);

impl VisualHandle {
    /// Handle carried by cards that were never made observable.
    pub const UNASSIGNED: Self = Self(0);

    /// Create a new visual handle.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Check whether a handle has been assigned.
    #[must_use]
    pub const fn is_assigned(self) -> bool {
        self.0 != 0
    }
}

impl std::fmt::Display for VisualHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Visual({})", self.0)
    }
}

/// Card suit, in `suit_index` order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

impl Suit {
    /// All suits in index order.
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

    /// Map a `suit_index` to its suit.
    #[must_use]
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(usize::from(index)).copied()
    }

    /// The wire index of this suit.
    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }
}

impl std::fmt::Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Suit::Hearts => "Hearts",
            Suit::Diamonds => "Diamonds",
            Suit::Clubs => "Clubs",
            Suit::Spades => "Spades",
        };
        f.write_str(name)
    }
}

/// Identity and visibility of a single card.
///
/// A plain value: equality compares every field and is used for diffing,
/// not identity. Once `visual` is assigned, it identifies the card.
///
/// Field order is the wire order and must not change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardState {
    /// 1 (ace) through 13 (king).
    pub rank: u8,
    /// 0..=3, see `Suit`.
    pub suit_index: u8,
    pub face_up: bool,
    /// `ParticipantId::UNOWNED` while in the deck.
    pub owner: ParticipantId,
    pub visual: VisualHandle,
}

impl CardState {
    /// A face-down, unowned, not-yet-observable card.
    #[must_use]
    pub const fn face_down(rank: u8, suit: Suit) -> Self {
        Self {
            rank,
            suit_index: suit.index(),
            face_up: false,
            owner: ParticipantId::UNOWNED,
            visual: VisualHandle::UNASSIGNED,
        }
    }

    /// Check the rank and suit invariants.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        (MIN_RANK..=MAX_RANK).contains(&self.rank) && self.suit_index < SUIT_COUNT
    }

    /// The card's suit, if `suit_index` is in range.
    #[must_use]
    pub fn suit(&self) -> Option<Suit> {
        Suit::from_index(self.suit_index)
    }

    /// Rank and suit, ignoring visibility and ownership.
    #[must_use]
    pub const fn face(&self) -> (u8, u8) {
        (self.rank, self.suit_index)
    }

    /// Iterate the 52 cards of one standard deck, face down and unowned.
    pub fn standard_deck() -> impl Iterator<Item = CardState> {
        Suit::ALL
            .into_iter()
            .flat_map(|suit| (MIN_RANK..=MAX_RANK).map(move |rank| CardState::face_down(rank, suit)))
    }
}

impl std::fmt::Display for CardState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rank = match self.rank {
            1 => "A".to_string(),
            11 => "J".to_string(),
            12 => "Q".to_string(),
            13 => "K".to_string(),
            n => n.to_string(),
        };
        match self.suit() {
            Some(suit) => write!(f, "{} of {}", rank, suit)?,
            None => write!(f, "{} of suit {}", rank, self.suit_index)?,
        }
        if self.face_up {
            write!(f, " (up)")
        } else {
            write!(f, " (down)")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_deck_composition() {
        let deck: Vec<_> = CardState::standard_deck().collect();
        assert_eq!(deck.len(), CARDS_PER_DECK);

        for suit in Suit::ALL {
            for rank in MIN_RANK..=MAX_RANK {
                let count = deck.iter().filter(|c| c.face() == (rank, suit.index())).count();
                assert_eq!(count, 1, "{} of {} appears {} times", rank, suit, count);
            }
        }

        assert!(deck.iter().all(|c| c.is_valid()));
        assert!(deck.iter().all(|c| !c.face_up));
        assert!(deck.iter().all(|c| c.owner.is_unowned()));
        assert!(deck.iter().all(|c| !c.visual.is_assigned()));
    }

    #[test]
    fn test_validity() {
        assert!(CardState::face_down(1, Suit::Hearts).is_valid());
        assert!(CardState::face_down(13, Suit::Spades).is_valid());

        let mut card = CardState::face_down(1, Suit::Hearts);
        card.rank = 0;
        assert!(!card.is_valid());
        card.rank = 14;
        assert!(!card.is_valid());
        card.rank = 5;
        card.suit_index = 4;
        assert!(!card.is_valid());
        assert_eq!(card.suit(), None);
    }

    #[test]
    fn test_equality_covers_all_fields() {
        let a = CardState::face_down(5, Suit::Clubs);
        let mut b = a;
        assert_eq!(a, b);

        b.face_up = true;
        assert_ne!(a, b);

        let mut c = a;
        c.visual = VisualHandle(3);
        assert_ne!(a, c);

        let mut d = a;
        d.owner = ParticipantId(2);
        assert_ne!(a, d);
    }

    #[test]
    fn test_suit_index_roundtrip() {
        for suit in Suit::ALL {
            assert_eq!(Suit::from_index(suit.index()), Some(suit));
        }
        assert_eq!(Suit::from_index(4), None);
        assert_eq!(Suit::Hearts.index(), 0);
        assert_eq!(Suit::Spades.index(), 3);
    }

    #[test]
    fn test_display() {
        let mut card = CardState::face_down(12, Suit::Hearts);
        assert_eq!(card.to_string(), "Q of Hearts (down)");
        card.face_up = true;
        card.rank = 7;
        assert_eq!(card.to_string(), "7 of Hearts (up)");
        assert_eq!(VisualHandle(9).to_string(), "Visual(9)");
    }
}
