//! Core types: participants, configuration, errors, RNG.
//!
//! Everything else in the crate builds on these.

pub mod config;
pub mod error;
pub mod participant;
pub mod rng;

pub use config::{Role, SessionConfig, TurnGating, DEFAULT_MAX_DECK_COUNT, DEFAULT_TURN_SECS};
pub use error::{CodecError, ConfigError, Rejection};
pub use participant::ParticipantId;
pub use rng::{GameRng, GameRngState};
