//! Turn rotation.
//!
//! `TurnCoordinator` owns whose turn it is, the turn timer, and the
//! rotation order. The session reads it to authorize turn-gated commands
//! and drives it through its transition methods.

pub mod coordinator;

pub use coordinator::{TurnCoordinator, TurnPhase, TurnState};
