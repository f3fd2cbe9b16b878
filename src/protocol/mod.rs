//! The logical messages crossing the transport.
//!
//! Participants send `Command`s; the authority answers with
//! `ReplicationEvent`s addressed to an `Audience`. How bytes move is the
//! transport's business. This module fixes the message set, the
//! interfaces on either side of the authority, and the wire encoding.
//!
//! ## Key Types
//!
//! - `Command`: participant intents
//! - `ReplicationEvent`, `Envelope`, `Audience`, `Outbox`: outbound changes
//! - `ReplicationChannel`: outbound interface (`QueueChannel` in memory)
//! - `CommandHandler`: inbound interface the session implements

pub mod channel;
pub mod codec;
pub mod command;
pub mod event;
pub mod handler;

pub use channel::{QueueChannel, ReplicationChannel};
pub use command::Command;
pub use event::{Audience, Envelope, Outbox, ReplicationEvent};
pub use handler::CommandHandler;
