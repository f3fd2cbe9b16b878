//! Message-handling interface the authority side implements.
//!
//! The transport calls into a `CommandHandler` for everything it receives:
//! commands (with the sender it authenticated), connection changes, and the
//! periodic tick. Implementations process each call to completion before
//! returning, so calls made in order are applied in order.

use std::time::Duration;

use super::command::Command;
use crate::core::ParticipantId;

/// Inbound side of the transport.
///
/// ## Implementation Notes
///
/// - `handle`: untrusted input; must never panic or partially apply
/// - `tick`: drives turn timeouts; serialized with `handle`
/// - Connection hooks keep the turn rotation in sync with the transport
pub trait CommandHandler {
    /// Process one command from `sender`.
    fn handle(&mut self, sender: ParticipantId, command: Command);

    /// Advance timers by `elapsed`.
    fn tick(&mut self, elapsed: Duration);

    /// A participant finished connecting.
    fn participant_connected(&mut self, participant: ParticipantId);

    /// A participant went away.
    fn participant_disconnected(&mut self, participant: ParticipantId);

    // === Convenience Methods ===

    /// Process commands strictly in arrival order.
    fn handle_batch<I>(&mut self, batch: I)
    where
        I: IntoIterator<Item = (ParticipantId, Command)>,
        Self: Sized,
    {
        for (sender, command) in batch {
            self.handle(sender, command);
        }
    }
}
