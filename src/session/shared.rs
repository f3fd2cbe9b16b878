//! Thread-safe handle to a `Session`.
//!
//! Transports that read sockets on several threads clone a `SharedSession`
//! per thread. Every call takes the session lock for its full duration, so
//! commands from different threads are still applied one at a time.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use super::dispatch::Session;
use crate::authority::TableSnapshot;
use crate::core::{ParticipantId, Rejection};
use crate::protocol::{Command, CommandHandler, ReplicationChannel};

/// Cloneable, lock-guarded `Session`.
pub struct SharedSession<C> {
    inner: Arc<Mutex<Session<C>>>,
}

impl<C> Clone for SharedSession<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C: ReplicationChannel> SharedSession<C> {
    #[must_use]
    pub fn new(session: Session<C>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    /// Run `f` with shared access to the session.
    pub fn with<R>(&self, f: impl FnOnce(&Session<C>) -> R) -> R {
        let session = self.inner.lock();
        f(&*session)
    }

    /// Run `f` with exclusive access to the session.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut Session<C>) -> R) -> R {
        let mut session = self.inner.lock();
        f(&mut *session)
    }

    #[must_use]
    pub fn snapshot(&self) -> TableSnapshot {
        self.inner.lock().snapshot()
    }

    /// See [`Session::apply`].
    pub fn submit(&self, sender: ParticipantId, command: Command) -> Result<usize, Rejection> {
        self.inner.lock().apply(sender, command)
    }
}

impl<C: ReplicationChannel> CommandHandler for SharedSession<C> {
    fn handle(&mut self, sender: ParticipantId, command: Command) {
        self.inner.lock().handle(sender, command);
    }

    fn tick(&mut self, elapsed: Duration) {
        self.inner.lock().tick(elapsed);
    }

    fn participant_connected(&mut self, participant: ParticipantId) {
        self.inner.lock().participant_connected(participant);
    }

    fn participant_disconnected(&mut self, participant: ParticipantId) {
        self.inner.lock().participant_disconnected(participant);
    }
}
