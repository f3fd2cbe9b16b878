//! Card data model.
//!
//! ## Key Types
//!
//! - `CardState`: rank, suit, visibility, owner, visual handle
//! - `Suit`: suit names for `suit_index`
//! - `VisualHandle`: stable identity of an observable card

pub mod card;

pub use card::{CardState, Suit, VisualHandle, CARDS_PER_DECK, MAX_RANK, MIN_RANK, SUIT_COUNT};
