//! The game state authority.
//!
//! `GameStateAuthority` is the only writer of the deck, hands, and discard
//! piles. It validates every participant command against the table,
//! applies it atomically, and returns the replication envelopes that
//! describe the change.
//!
//! ## Key Types
//!
//! - `GameStateAuthority`: command validation and application
//! - `TableSnapshot`: read-only, serializable copy of the table

pub mod manager;
pub mod snapshot;

pub use manager::GameStateAuthority;
pub use snapshot::TableSnapshot;
