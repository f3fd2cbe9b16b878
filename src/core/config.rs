//! Session configuration.
//!
//! Hosts configure a session at startup by providing a `SessionConfig`:
//! - `Role`: whether this process owns the shared state
//! - Turn duration and turn gating policy
//! - Setup privilege, deck count cap, shuffle seed
//!
//! The config is plain data (serde) so it can be loaded from whatever
//! format the host process uses.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use super::participant::ParticipantId;

/// Default turn length, in seconds.
pub const DEFAULT_TURN_SECS: u64 = 30;

/// Default upper bound on `InitializeDeck`.
pub const DEFAULT_MAX_DECK_COUNT: u32 = 8;

/// Which side of the replication boundary this process is on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Sole writer of deck, hands, piles, and turn state.
    #[default]
    Authority,
    /// Mirrors state from replication events. Every command is a no-op.
    Observer,
}

impl Role {
    /// Check whether this process may mutate shared state.
    #[must_use]
    pub const fn is_authority(self) -> bool {
        matches!(self, Role::Authority)
    }
}

/// Whether draw/discard/flip require the requester to hold the turn.
///
/// `EndTurn` is always gated; this only covers the card actions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnGating {
    /// Card actions are legal at any time.
    #[default]
    Free,
    /// Card actions from anyone but the current participant are rejected.
    CurrentParticipantOnly,
}

/// Complete session configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Authority or observer.
    pub role: Role,

    /// Time each participant holds the turn before it rotates.
    pub turn_duration: Duration,

    /// Turn gating for draw/discard/flip.
    pub turn_gating: TurnGating,

    /// If set, only this participant may send setup commands
    /// (`InitializeDeck`, `Shuffle`, `DealInitialHands`).
    pub setup_host: Option<ParticipantId>,

    /// Largest accepted `InitializeDeck` count.
    pub max_deck_count: u32,

    /// Shuffle seed. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            role: Role::Authority,
            turn_duration: Duration::from_secs(DEFAULT_TURN_SECS),
            turn_gating: TurnGating::Free,
            setup_host: None,
            max_deck_count: DEFAULT_MAX_DECK_COUNT,
            seed: None,
        }
    }
}

impl SessionConfig {
    /// Create a default authority configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the process role.
    #[must_use]
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    /// Set the turn duration.
    #[must_use]
    pub fn with_turn_duration(mut self, duration: Duration) -> Self {
        self.turn_duration = duration;
        self
    }

    /// Set the turn gating policy for card actions.
    #[must_use]
    pub fn with_turn_gating(mut self, gating: TurnGating) -> Self {
        self.turn_gating = gating;
        self
    }

    /// Restrict setup commands to one participant.
    #[must_use]
    pub fn with_setup_host(mut self, host: ParticipantId) -> Self {
        self.setup_host = Some(host);
        self
    }

    /// Set the deck count cap.
    #[must_use]
    pub fn with_max_deck_count(mut self, max: u32) -> Self {
        self.max_deck_count = max;
        self
    }

    /// Fix the shuffle seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check the configuration is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.turn_duration.is_zero() {
            return Err(ConfigError::ZeroTurnDuration);
        }
        if self.max_deck_count == 0 {
            return Err(ConfigError::ZeroMaxDeckCount);
        }
        Ok(())
    }

    /// Check whether `sender` may run setup commands.
    #[must_use]
    pub fn may_run_setup(&self, sender: ParticipantId) -> bool {
        self.setup_host.map_or(true, |host| host == sender)
    }
}
