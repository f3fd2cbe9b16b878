//! Replication channel: where the authority pushes committed changes.
//!
//! The transport behind a channel is an external collaborator. The
//! authority publishes and moves on; it never waits for delivery.

use super::event::{Envelope, Outbox};
use crate::core::ParticipantId;

/// Outbound side of the transport.
pub trait ReplicationChannel {
    /// Hand one envelope to the transport. Fire and forget.
    fn publish(&mut self, envelope: Envelope);

    /// Publish every envelope of an outbox, preserving order.
    fn publish_all(&mut self, outbox: Outbox) {
        for envelope in outbox {
            self.publish(envelope);
        }
    }
}

impl<C: ReplicationChannel + ?Sized> ReplicationChannel for &mut C {
    fn publish(&mut self, envelope: Envelope) {
        (**self).publish(envelope);
    }
}

/// In-memory channel that queues envelopes until drained.
///
/// Hosts that poll (a game loop, a test) drain it after each batch of
/// commands and fan the envelopes out to their transport.
#[derive(Clone, Debug, Default)]
pub struct QueueChannel {
    queue: Vec<Envelope>,
}

impl QueueChannel {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Envelopes published so far, oldest first.
    #[must_use]
    pub fn pending(&self) -> &[Envelope] {
        &self.queue
    }

    /// Number of queued envelopes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Take every queued envelope.
    pub fn drain(&mut self) -> Vec<Envelope> {
        std::mem::take(&mut self.queue)
    }

    /// Take every queued envelope, keeping only those `participant` receives.
    pub fn drain_for(&mut self, participant: ParticipantId) -> Vec<Envelope> {
        self.drain()
            .into_iter()
            .filter(|e| e.audience.includes(participant))
            .collect()
    }
}

impl ReplicationChannel for QueueChannel {
    fn publish(&mut self, envelope: Envelope) {
        self.queue.push(envelope);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::event::ReplicationEvent;

    fn turn(id: u64) -> ReplicationEvent {
        ReplicationEvent::TurnChanged { participant: ParticipantId(id) }
    }

    #[test]
    fn test_queue_preserves_order() {
        let mut channel = QueueChannel::new();
        channel.publish(Envelope::to_all(turn(1)));
        channel.publish(Envelope::to_all(turn(2)));

        assert_eq!(channel.len(), 2);
        let drained = channel.drain();
        assert_eq!(drained[0].event, turn(1));
        assert_eq!(drained[1].event, turn(2));
        assert!(channel.is_empty());
    }

    #[test]
    fn test_drain_for_filters_audience() {
        let mut channel = QueueChannel::new();
        channel.publish(Envelope::to_only(ParticipantId(1), turn(1)));
        channel.publish(Envelope::to_only(ParticipantId(2), turn(2)));
        channel.publish(Envelope::to_all(turn(3)));

        let for_one = channel.drain_for(ParticipantId(1));
        assert_eq!(for_one.len(), 2);
        assert_eq!(for_one[0].event, turn(1));
        assert_eq!(for_one[1].event, turn(3));
        assert!(channel.is_empty());
    }

    #[test]
    fn test_publish_all() {
        let mut channel = QueueChannel::new();
        let mut outbox = Outbox::new();
        outbox.push(Envelope::to_all(turn(1)));
        outbox.push(Envelope::to_all(turn(2)));
        outbox.push(Envelope::to_all(turn(3)));

        channel.publish_all(outbox);
        assert_eq!(channel.pending().len(), 3);
        assert_eq!(channel.pending()[2].event, turn(3));
    }

    #[test]
    fn test_mut_ref_forwards() {
        fn send_one<C: ReplicationChannel>(mut channel: C) {
            channel.publish(Envelope::to_all(turn(9)));
        }

        let mut channel = QueueChannel::new();
        send_one(&mut channel);
        assert_eq!(channel.len(), 1);
    }
}
