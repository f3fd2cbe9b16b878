//! Error types.
//!
//! - `Rejection`: why a command was refused. Never surfaced to participants;
//!   the session turns every rejection into silence and a debug log line.
//! - `ConfigError`: invalid `SessionConfig`, raised at session construction.
//! - `CodecError`: malformed bytes from the transport.

use thiserror::Error;

use super::participant::ParticipantId;

/// Reason a command was refused.
///
/// A rejection guarantees the refusing component did not mutate anything.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// This process does not own the shared state.
    #[error("process is not the authority")]
    NotAuthority,

    /// `InitializeDeck` asked for zero decks or more than the configured cap.
    #[error("deck count {requested} outside 1..={max}")]
    InvalidDeckCount { requested: u32, max: u32 },

    /// Nothing left to draw.
    #[error("deck is empty")]
    DeckEmpty,

    /// Index does not address a card in the requester's hand.
    #[error("hand index {index} out of bounds for hand of {len}")]
    HandIndexOutOfBounds { index: usize, len: usize },

    /// Turn-gated action from someone other than the current participant.
    #[error("{requester} is not the current participant")]
    NotCurrentParticipant { requester: ParticipantId },

    /// No participants are connected, so there is no turn to act on.
    #[error("no active turn")]
    NoActiveTurn,

    /// Session setup command from a participant other than the setup host.
    #[error("{sender} may not run session setup")]
    SetupNotPermitted { sender: ParticipantId },

    /// The reserved unowned id, or an id the session does not know.
    #[error("unknown participant {0}")]
    UnknownParticipant(ParticipantId),
}

/// Invalid session configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("turn duration must be greater than zero")]
    ZeroTurnDuration,

    #[error("max deck count must be at least 1")]
    ZeroMaxDeckCount,
}

/// Failure decoding or encoding a wire message.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("malformed message: {0}")]
    Malformed(#[from] bincode::Error),

    #[error("invalid card on the wire: rank {rank}, suit index {suit_index}")]
    InvalidCard { rank: u8, suit_index: u8 },

    #[error("card owned by {owner} reported for {participant}")]
    ForeignCard { participant: ParticipantId, owner: ParticipantId },
}
