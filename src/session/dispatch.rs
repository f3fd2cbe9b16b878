//! Session: routes participant commands to the authority and coordinator.
//!
//! One `Session` is the single writer for a table. Each call runs to
//! completion before the next: validate, mutate, then publish the
//! resulting envelopes. Nothing is published for a rejected command, so a
//! participant cannot tell one rejection reason from another.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::authority::{GameStateAuthority, TableSnapshot};
use crate::core::{ConfigError, ParticipantId, Rejection, SessionConfig, TurnGating};
use crate::protocol::{Command, CommandHandler, Outbox, ReplicationChannel};
use crate::turns::TurnCoordinator;

/// Counters for logs and health checks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub commands_applied: u64,
    pub commands_rejected: u64,
    pub events_published: u64,
}

/// A hosted table: authority, turn coordinator, and outbound channel.
///
/// ## Example
///
/// ```
/// use card_authority::core::{ParticipantId, SessionConfig};
/// use card_authority::protocol::{Command, CommandHandler, QueueChannel};
/// use card_authority::session::Session;
///
/// let mut session = Session::new(SessionConfig::new().with_seed(7), QueueChannel::new()).unwrap();
/// let alice = ParticipantId::new(1);
///
/// session.participant_connected(alice);
/// session.handle(alice, Command::InitializeDeck { deck_count: 1 });
/// session.handle(alice, Command::DrawCard);
///
/// assert_eq!(session.authority().deck().len(), 51);
/// ```
#[derive(Debug)]
pub struct Session<C> {
    config: SessionConfig,
    authority: GameStateAuthority,
    turns: TurnCoordinator,
    channel: C,
    stats: SessionStats,
}

impl<C: ReplicationChannel> Session<C> {
    /// Create a session from a validated configuration.
    pub fn new(config: SessionConfig, channel: C) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            authority: GameStateAuthority::from_config(&config),
            turns: TurnCoordinator::new(config.turn_duration),
            config,
            channel,
            stats: SessionStats::default(),
        })
    }

    // === Queries ===

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn authority(&self) -> &GameStateAuthority {
        &self.authority
    }

    #[must_use]
    pub fn turns(&self) -> &TurnCoordinator {
        &self.turns
    }

    #[must_use]
    pub fn channel(&self) -> &C {
        &self.channel
    }

    pub fn channel_mut(&mut self) -> &mut C {
        &mut self.channel
    }

    /// Tear down the session, keeping the channel.
    pub fn into_channel(self) -> C {
        self.channel
    }

    #[must_use]
    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// See [`GameStateAuthority::generation`].
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.authority.generation()
    }

    /// Copy of the table, taken between commands.
    #[must_use]
    pub fn snapshot(&self) -> TableSnapshot {
        self.authority.snapshot()
    }

    // === Commands ===

    /// Validate and apply one command from `sender`, publishing the result.
    ///
    /// Returns the number of envelopes published. `handle` is the silent
    /// form of this for transports.
    pub fn apply(&mut self, sender: ParticipantId, command: Command) -> Result<usize, Rejection> {
        let result = self.dispatch(Some(sender), command);
        self.settle(result)
    }

    /// Run a setup command from the host process itself.
    ///
    /// Bypasses the `setup_host` check; non-setup commands need a sender
    /// and are rejected.
    pub fn apply_setup(&mut self, command: Command) -> Result<usize, Rejection> {
        let result = if command.is_setup() {
            self.dispatch(None, command)
        } else {
            Err(Rejection::UnknownParticipant(ParticipantId::UNOWNED))
        };
        self.settle(result)
    }

    fn settle(&mut self, result: Result<Outbox, Rejection>) -> Result<usize, Rejection> {
        match result {
            Ok(outbox) => {
                self.stats.commands_applied += 1;
                Ok(self.publish(outbox))
            }
            Err(reason) => {
                self.stats.commands_rejected += 1;
                Err(reason)
            }
        }
    }

    /// `sender` is `None` for the host process.
    fn dispatch(&mut self, sender: Option<ParticipantId>, command: Command) -> Result<Outbox, Rejection> {
        if !self.config.role.is_authority() {
            return Err(Rejection::NotAuthority);
        }

        if let Some(sender) = sender {
            if !self.turns.is_connected(sender) {
                return Err(Rejection::UnknownParticipant(sender));
            }
            if command.is_setup() && !self.config.may_run_setup(sender) {
                return Err(Rejection::SetupNotPermitted { sender });
            }
            if command.is_card_action()
                && self.config.turn_gating == TurnGating::CurrentParticipantOnly
                && !self.turns.is_current(sender)
            {
                return Err(Rejection::NotCurrentParticipant { requester: sender });
            }
        }

        let requester = sender.unwrap_or(ParticipantId::UNOWNED);
        match command {
            Command::InitializeDeck { deck_count } => self.authority.initialize_deck(deck_count),
            Command::Shuffle => self.authority.shuffle(),
            Command::DealInitialHands { cards_per_participant } => self
                .authority
                .deal_initial_hands(self.turns.turn_order(), cards_per_participant),
            Command::DrawCard => self.authority.draw_card(requester),
            Command::DiscardCard { hand_index, to_shared_pile } => {
                self.authority
                    .discard_card(requester, wire_index(hand_index), to_shared_pile)
            }
            Command::FlipCard { hand_index } => self.authority.flip_card(requester, wire_index(hand_index)),
            Command::EndTurn => self.turns.end_turn(requester),
        }
    }

    fn publish(&mut self, outbox: Outbox) -> usize {
        let count = outbox.len();
        self.channel.publish_all(outbox);
        self.stats.events_published += count as u64;
        count
    }
}

/// Hand indices beyond `usize` can never be in bounds.
fn wire_index(index: u32) -> usize {
    usize::try_from(index).unwrap_or(usize::MAX)
}

impl<C: ReplicationChannel> CommandHandler for Session<C> {
    fn handle(&mut self, sender: ParticipantId, command: Command) {
        match self.apply(sender, command) {
            Ok(events) => debug!(%sender, command = command.name(), events, "command applied"),
            Err(reason) => debug!(%sender, command = command.name(), %reason, "command rejected"),
        }
    }

    fn tick(&mut self, elapsed: Duration) {
        if !self.config.role.is_authority() {
            return;
        }
        let outbox = self.turns.tick(elapsed);
        self.publish(outbox);
    }

    fn participant_connected(&mut self, participant: ParticipantId) {
        if !self.config.role.is_authority() {
            return;
        }
        match self.turns.connect(participant) {
            Ok(outbox) => {
                self.publish(outbox);
            }
            Err(reason) => warn!(%participant, %reason, "connection ignored"),
        }
    }

    fn participant_disconnected(&mut self, participant: ParticipantId) {
        if !self.config.role.is_authority() {
            return;
        }
        match self.turns.disconnect(participant) {
            Ok(outbox) => {
                self.publish(outbox);
            }
            Err(reason) => warn!(%participant, %reason, "disconnect ignored"),
        }
    }
}
