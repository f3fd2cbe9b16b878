//! Participant-side view of the table.
//!
//! The authority never looks up presentation objects. Each participant
//! keeps its own `TableView`, feeds it the envelopes it receives, and maps
//! visual handles to whatever it renders.
//!
//! ## Key Types
//!
//! - `TableView`: mirror of what one participant can see
//! - `CardLocation`: last known place of a visual

mod mirror;

pub use mirror::{CardLocation, TableView};
