//! Shared helpers for integration tests.
#![allow(dead_code)]

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

use card_authority::core::{ParticipantId, SessionConfig};
use card_authority::protocol::{Command, CommandHandler, QueueChannel};
use card_authority::session::Session;

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Install a test subscriber once per binary.
///
/// Level comes from `TEST_LOG`, then `RUST_LOG`, then `warn`.
pub fn init_logging() {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

pub const ALICE: ParticipantId = ParticipantId(1);
pub const BOB: ParticipantId = ParticipantId(2);
pub const CAROL: ParticipantId = ParticipantId(3);

/// Seeded session with `participants` connected in order and one deck built.
pub fn table(config: SessionConfig, participants: &[ParticipantId]) -> Session<QueueChannel> {
    init_logging();
    let mut session = Session::new(config.with_seed(2024), QueueChannel::new()).unwrap();
    for &p in participants {
        session.participant_connected(p);
    }
    session.apply_setup(Command::InitializeDeck { deck_count: 1 }).unwrap();
    session.channel_mut().drain();
    session
}
