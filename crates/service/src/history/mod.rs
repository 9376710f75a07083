//! Append-only audit trail for comment mutations.

pub mod domain;
pub mod recorder;
pub mod repo;

pub use domain::{HistoryAction, HistoryEntry};
pub use recorder::HistoryRecorder;
