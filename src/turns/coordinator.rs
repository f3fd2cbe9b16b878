//! Turn coordinator: whose turn it is, how long they have, who is next.
//!
//! ## States
//!
//! - `Idle`: nobody connected
//! - `Active { current, remaining }`: `current` holds the turn
//!
//! ## Transitions
//!
//! - First connection while `Idle` starts the first turn
//! - A tick that exhausts `remaining`, or `EndTurn` from the current
//!   participant, rotates to the next entry in `turn_order` (wrapping)
//! - The current participant disconnecting rotates immediately to whoever
//!   followed them
//! - The last participant disconnecting returns to `Idle`
//!
//! Every turn start emits `TurnChanged` to all participants.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, info};

use crate::core::{ParticipantId, Rejection};
use crate::protocol::{Envelope, Outbox, ReplicationEvent};

/// Coordinator state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    Idle,
    Active {
        current: ParticipantId,
        remaining: Duration,
    },
}

/// Read-only copy of the turn state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnState {
    pub phase: TurnPhase,
    /// Rotation order, in connection order.
    pub turn_order: Vec<ParticipantId>,
    /// Turns started so far (the first turn is 1).
    pub turn_number: u32,
}

impl TurnState {
    /// The participant holding the turn.
    #[must_use]
    pub fn current(&self) -> Option<ParticipantId> {
        match self.phase {
            TurnPhase::Idle => None,
            TurnPhase::Active { current, .. } => Some(current),
        }
    }
}

/// Turn rotation state machine.
///
/// Sole owner of the turn state. Callers only use the transition methods.
#[derive(Clone, Debug)]
pub struct TurnCoordinator {
    turn_duration: Duration,
    /// SmallVec sized for a full eight-seat table.
    turn_order: SmallVec<[ParticipantId; 8]>,
    phase: TurnPhase,
    turn_number: u32,
}

impl TurnCoordinator {
    /// Create an idle coordinator.
    #[must_use]
    pub fn new(turn_duration: Duration) -> Self {
        Self {
            turn_duration,
            turn_order: SmallVec::new(),
            phase: TurnPhase::Idle,
            turn_number: 0,
        }
    }

    // === Queries ===

    /// Configured turn length.
    #[must_use]
    pub fn turn_duration(&self) -> Duration {
        self.turn_duration
    }

    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// The participant holding the turn, if any.
    #[must_use]
    pub fn current(&self) -> Option<ParticipantId> {
        match self.phase {
            TurnPhase::Idle => None,
            TurnPhase::Active { current, .. } => Some(current),
        }
    }

    /// Time left in the current turn.
    #[must_use]
    pub fn remaining(&self) -> Option<Duration> {
        match self.phase {
            TurnPhase::Idle => None,
            TurnPhase::Active { remaining, .. } => Some(remaining),
        }
    }

    /// Check whether `participant` holds the turn.
    #[must_use]
    pub fn is_current(&self, participant: ParticipantId) -> bool {
        self.current() == Some(participant)
    }

    /// Connected participants in rotation order.
    #[must_use]
    pub fn turn_order(&self) -> &[ParticipantId] {
        &self.turn_order
    }

    /// Check whether `participant` is in the rotation.
    #[must_use]
    pub fn is_connected(&self, participant: ParticipantId) -> bool {
        self.turn_order.contains(&participant)
    }

    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    /// Snapshot for logs, views, and tests.
    #[must_use]
    pub fn state(&self) -> TurnState {
        TurnState {
            phase: self.phase,
            turn_order: self.turn_order.to_vec(),
            turn_number: self.turn_number,
        }
    }

    // === Transitions ===

    /// Add a participant to the end of the rotation.
    ///
    /// Starts the first turn if the coordinator was idle. Reconnecting an
    /// already-connected participant changes nothing.
    pub fn connect(&mut self, participant: ParticipantId) -> Result<Outbox, Rejection> {
        if participant.is_unowned() {
            return Err(Rejection::UnknownParticipant(participant));
        }
        if self.is_connected(participant) {
            debug!(%participant, "already in rotation");
            return Ok(Outbox::new());
        }

        self.turn_order.push(participant);
        info!(%participant, seats = self.turn_order.len(), "participant joined rotation");

        match self.phase {
            TurnPhase::Idle => Ok(self.start_turn(participant)),
            TurnPhase::Active { .. } => Ok(Outbox::new()),
        }
    }

    /// Remove a participant from the rotation.
    ///
    /// If they held the turn, the participant that followed them takes it
    /// at once. Removing the last participant returns to `Idle`.
    pub fn disconnect(&mut self, participant: ParticipantId) -> Result<Outbox, Rejection> {
        let Some(pos) = self.turn_order.iter().position(|&p| p == participant) else {
            return Err(Rejection::UnknownParticipant(participant));
        };

        self.turn_order.remove(pos);
        info!(%participant, seats = self.turn_order.len(), "participant left rotation");

        if self.turn_order.is_empty() {
            self.phase = TurnPhase::Idle;
            info!("rotation empty, turns idle");
            return Ok(Outbox::new());
        }

        if self.is_current(participant) {
            // The follower slid into `pos`; wrap if the leaver was last.
            let next = self.turn_order[pos % self.turn_order.len()];
            debug!(from = %participant, to = %next, "current participant left");
            return Ok(self.start_turn(next));
        }

        Ok(Outbox::new())
    }

    /// Count down the current turn, rotating once if it runs out.
    ///
    /// At most one rotation happens per tick, however long `elapsed` is.
    pub fn tick(&mut self, elapsed: Duration) -> Outbox {
        let TurnPhase::Active { current, remaining } = self.phase else {
            return Outbox::new();
        };

        let remaining = remaining.saturating_sub(elapsed);
        self.phase = TurnPhase::Active { current, remaining };

        if remaining.is_zero() {
            debug!(participant = %current, "turn timed out");
            self.advance()
        } else {
            Outbox::new()
        }
    }

    /// End the turn on behalf of `requester`.
    ///
    /// Only the current participant may end their turn.
    pub fn end_turn(&mut self, requester: ParticipantId) -> Result<Outbox, Rejection> {
        match self.phase {
            TurnPhase::Idle => Err(Rejection::NoActiveTurn),
            TurnPhase::Active { current, .. } if current != requester => {
                Err(Rejection::NotCurrentParticipant { requester })
            }
            TurnPhase::Active { .. } => {
                debug!(participant = %requester, "turn ended by participant");
                Ok(self.advance())
            }
        }
    }

    /// Rotate to the entry after the current one.
    fn advance(&mut self) -> Outbox {
        let Some(current) = self.current() else {
            return Outbox::new();
        };
        if self.turn_order.is_empty() {
            return Outbox::new();
        }

        let next_index = self
            .turn_order
            .iter()
            .position(|&p| p == current)
            .map_or(0, |i| (i + 1) % self.turn_order.len());
        let next = self.turn_order[next_index];
        self.start_turn(next)
    }

    fn start_turn(&mut self, participant: ParticipantId) -> Outbox {
        self.phase = TurnPhase::Active {
            current: participant,
            remaining: self.turn_duration,
        };
        self.turn_number += 1;
        debug!(%participant, turn = self.turn_number, "turn started");

        let mut outbox = Outbox::new();
        outbox.push(Envelope::to_all(ReplicationEvent::TurnChanged { participant }));
        outbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: ParticipantId = ParticipantId(1);
    const B: ParticipantId = ParticipantId(2);
    const C: ParticipantId = ParticipantId(3);

    fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    fn turn_changed(outbox: &Outbox) -> Option<ParticipantId> {
        outbox.iter().find_map(|e| match e.event {
            ReplicationEvent::TurnChanged { participant } => Some(participant),
            _ => None,
        })
    }

    fn abc() -> TurnCoordinator {
        let mut turns = TurnCoordinator::new(secs(30));
        for p in [A, B, C] {
            turns.connect(p).unwrap();
        }
        turns
    }

    #[test]
    fn test_starts_idle() {
        let turns = TurnCoordinator::new(secs(30));
        assert_eq!(turns.phase(), TurnPhase::Idle);
        assert_eq!(turns.current(), None);
        assert_eq!(turns.remaining(), None);
        assert!(turns.turn_order().is_empty());
    }

    #[test]
    fn test_first_connect_starts_turn() {
        let mut turns = TurnCoordinator::new(secs(30));
        let outbox = turns.connect(A).unwrap();

        assert_eq!(turns.current(), Some(A));
        assert_eq!(turns.remaining(), Some(secs(30)));
        assert_eq!(turns.turn_number(), 1);
        assert_eq!(turn_changed(&outbox), Some(A));
        assert_eq!(outbox[0].audience, crate::protocol::Audience::All);
    }

    #[test]
    fn test_later_connect_keeps_current() {
        let mut turns = TurnCoordinator::new(secs(30));
        turns.connect(A).unwrap();
        let outbox = turns.connect(B).unwrap();

        assert!(outbox.is_empty());
        assert_eq!(turns.current(), Some(A));
        assert_eq!(turns.turn_order(), &[A, B]);
    }

    #[test]
    fn test_duplicate_connect_is_noop() {
        let mut turns = abc();
        let outbox = turns.connect(B).unwrap();
        assert!(outbox.is_empty());
        assert_eq!(turns.turn_order(), &[A, B, C]);
    }

    #[test]
    fn test_unowned_cannot_connect() {
        let mut turns = TurnCoordinator::new(secs(30));
        assert_eq!(
            turns.connect(ParticipantId::UNOWNED),
            Err(Rejection::UnknownParticipant(ParticipantId::UNOWNED))
        );
        assert_eq!(turns.phase(), TurnPhase::Idle);
    }

    #[test]
    fn test_end_turn_rotates() {
        let mut turns = abc();

        let outbox = turns.end_turn(A).unwrap();
        assert_eq!(turns.current(), Some(B));
        assert_eq!(turn_changed(&outbox), Some(B));

        // Not current: rejected, nothing changes
        assert_eq!(
            turns.end_turn(C),
            Err(Rejection::NotCurrentParticipant { requester: C })
        );
        assert_eq!(turns.current(), Some(B));
    }

    #[test]
    fn test_end_turn_wraps() {
        let mut turns = abc();
        turns.end_turn(A).unwrap();
        turns.end_turn(B).unwrap();
        turns.end_turn(C).unwrap();
        assert_eq!(turns.current(), Some(A));
        assert_eq!(turns.turn_number(), 4);
    }

    #[test]
    fn test_end_turn_resets_timer() {
        let mut turns = abc();
        turns.tick(secs(20));
        assert_eq!(turns.remaining(), Some(secs(10)));

        turns.end_turn(A).unwrap();
        assert_eq!(turns.remaining(), Some(secs(30)));
    }

    #[test]
    fn test_end_turn_when_idle() {
        let mut turns = TurnCoordinator::new(secs(30));
        assert_eq!(turns.end_turn(A), Err(Rejection::NoActiveTurn));
    }

    #[test]
    fn test_tick_counts_down_then_rotates() {
        let mut turns = abc();

        assert!(turns.tick(secs(29)).is_empty());
        assert_eq!(turns.current(), Some(A));
        assert_eq!(turns.remaining(), Some(secs(1)));

        let outbox = turns.tick(secs(1));
        assert_eq!(turn_changed(&outbox), Some(B));
        assert_eq!(turns.remaining(), Some(secs(30)));
    }

    #[test]
    fn test_tick_overshoot_rotates_once() {
        let mut turns = abc();
        let outbox = turns.tick(secs(500));

        assert_eq!(outbox.len(), 1);
        assert_eq!(turns.current(), Some(B));
    }

    #[test]
    fn test_tick_idle_is_noop() {
        let mut turns = TurnCoordinator::new(secs(30));
        assert!(turns.tick(secs(100)).is_empty());
        assert_eq!(turns.phase(), TurnPhase::Idle);
    }

    #[test]
    fn test_single_participant_rotates_to_self() {
        let mut turns = TurnCoordinator::new(secs(5));
        turns.connect(A).unwrap();

        let outbox = turns.tick(secs(5));
        assert_eq!(turn_changed(&outbox), Some(A));
        assert_eq!(turns.turn_number(), 2);
    }

    #[test]
    fn test_current_disconnect_advances() {
        let mut turns = abc();
        turns.end_turn(A).unwrap();
        assert_eq!(turns.current(), Some(B));

        let outbox = turns.disconnect(B).unwrap();
        assert_eq!(turns.current(), Some(C));
        assert_eq!(turns.turn_order(), &[A, C]);
        assert_eq!(turn_changed(&outbox), Some(C));
        assert_eq!(turns.remaining(), Some(secs(30)));
    }

    #[test]
    fn test_last_in_order_disconnect_wraps() {
        let mut turns = abc();
        turns.end_turn(A).unwrap();
        turns.end_turn(B).unwrap();
        assert_eq!(turns.current(), Some(C));

        let outbox = turns.disconnect(C).unwrap();
        assert_eq!(turns.current(), Some(A));
        assert_eq!(turn_changed(&outbox), Some(A));
    }

    #[test]
    fn test_other_disconnect_keeps_current() {
        let mut turns = abc();
        turns.tick(secs(10));

        let outbox = turns.disconnect(C).unwrap();
        assert!(outbox.is_empty());
        assert_eq!(turns.current(), Some(A));
        assert_eq!(turns.remaining(), Some(secs(20)));
        assert_eq!(turns.turn_order(), &[A, B]);
    }

    #[test]
    fn test_last_disconnect_goes_idle() {
        let mut turns = TurnCoordinator::new(secs(30));
        turns.connect(A).unwrap();

        let outbox = turns.disconnect(A).unwrap();
        assert!(outbox.is_empty());
        assert_eq!(turns.phase(), TurnPhase::Idle);

        // Reconnecting starts a fresh turn
        let outbox = turns.connect(B).unwrap();
        assert_eq!(turn_changed(&outbox), Some(B));
    }

    #[test]
    fn test_unknown_disconnect_rejected() {
        let mut turns = abc();
        assert_eq!(
            turns.disconnect(ParticipantId(99)),
            Err(Rejection::UnknownParticipant(ParticipantId(99)))
        );
        assert_eq!(turns.turn_order(), &[A, B, C]);
    }

    #[test]
    fn test_state_snapshot() {
        let turns = abc();
        let state = turns.state();

        assert_eq!(state.current(), Some(A));
        assert_eq!(state.turn_order, vec![A, B, C]);
        assert_eq!(state.turn_number, 1);

        let json = serde_json::to_string(&state).unwrap();
        let back: TurnState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, back);
    }
}
