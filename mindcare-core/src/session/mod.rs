//! Chat session model
//!
//! A session holds the append-only transcript of one chat screen visit.
//! Transcripts live in memory only; nothing is persisted across visits.

pub mod state;
pub mod store;

pub use state::{SessionState, SubmitOutcome};
pub use store::{Message, Sender, Session};
