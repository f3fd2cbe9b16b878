//! # card-authority
//!
//! Server-authoritative engine for a shared-deck multiplayer card table.
//!
//! One process owns the deck, every hand, and the discard piles.
//! Participants send intents; the authority validates them, mutates the
//! table, and replicates the change to whoever is entitled to see it.
//!
//! ## Design Principles
//!
//! 1. **Single Writer**: All mutation goes through one `Session`. Each
//!    command runs to completion before the next is looked at.
//!
//! 2. **Untrusted Input**: Bad commands are rejected without mutating
//!    anything and without telling anyone. Nothing a participant sends
//!    can panic the authority.
//!
//! 3. **Explicit Replication**: Operations return the envelopes they
//!    produced; the session publishes them after the mutation commits.
//!
//! ## Architecture
//!
//! - **Persistent Piles**: Deck, hands, and piles are `im` vectors, so a
//!   `TableSnapshot` costs O(participants).
//!
//! - **Value Cards**: `CardState` is a plain value. Updates are
//!   read-modify-write-back at the card's index; identity lives in the
//!   `VisualHandle`.
//!
//! ## Modules
//!
//! - `core`: Participant ids, configuration, errors, RNG
//! - `cards`: Card state, suits, visual handles
//! - `zones`: Deck, hands, discard piles
//! - `protocol`: Commands, replication events, channel and handler traits, codec
//! - `authority`: The game state authority and snapshots
//! - `turns`: Turn rotation state machine
//! - `session`: Command dispatch and publishing
//! - `view`: Participant-side mirror and visual registry

pub mod core;
pub mod cards;
pub mod zones;
pub mod protocol;
pub mod authority;
pub mod turns;
pub mod session;
pub mod view;

// Re-export commonly used types
pub use crate::core::{
    ParticipantId,
    GameRng, GameRngState,
    Role, SessionConfig, TurnGating,
    CodecError, ConfigError, Rejection,
};

pub use crate::cards::{CardState, Suit, VisualHandle};

pub use crate::zones::{Deck, DiscardEngine, Hand, Hands, PileKind};

pub use crate::protocol::{
    Command, ReplicationEvent, Audience, Envelope, Outbox,
    ReplicationChannel, QueueChannel, CommandHandler,
};

pub use crate::authority::{GameStateAuthority, TableSnapshot};

pub use crate::turns::{TurnCoordinator, TurnPhase, TurnState};

pub use crate::session::{Session, SessionStats, SharedSession};

pub use crate::view::{CardLocation, TableView};
