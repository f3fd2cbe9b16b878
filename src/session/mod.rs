//! Hosting: the single-writer session that ties authority, turns, and the
//! replication channel together.
//!
//! ## Key Types
//!
//! - `Session`: validates and applies commands, publishes the results
//! - `SharedSession`: lock-guarded handle for multi-threaded transports
//! - `SessionStats`: applied/rejected/published counters

mod dispatch;
mod shared;

pub use dispatch::{Session, SessionStats};
pub use shared::SharedSession;
