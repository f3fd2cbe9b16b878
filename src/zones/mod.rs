//! Card locations: the deck, hands, and discard piles.
//!
//! Pure data structures. No validation lives here; the authority is the
//! only caller and bounds-checks before every mutation.
//!
//! ## Key Types
//!
//! - `Deck`: shared draw pile (top = end)
//! - `Hand` / `Hands`: per-participant ordered cards, created lazily
//! - `DiscardEngine`: shared pile plus per-participant private piles
//! - `PileKind`: discard destination

pub mod deck;
pub mod discard;
pub mod hand;

pub use deck::Deck;
pub use discard::{DiscardEngine, PileKind};
pub use hand::{Hand, Hands};
