use async_trait::async_trait;

use super::domain::HistoryEntry;
use crate::errors::ServiceError;

/// Sink for audit entries. Implementations append and never rewrite.
#[async_trait]
pub trait HistoryRecorder: Send + Sync {
    async fn record(&self, entry: HistoryEntry) -> Result<(), ServiceError>;
}

/// Recording sink for tests
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Mutex, PoisonError};

    #[derive(Default)]
    pub struct RecordingHistory {
        entries: Mutex<Vec<HistoryEntry>>,
        failing: AtomicBool,
    }

    impl RecordingHistory {
        /// Make every subsequent `record` fail with a storage error.
        pub fn set_failing(&self, failing: bool) { self.failing.store(failing, Ordering::SeqCst); }

        pub fn entries(&self) -> Vec<HistoryEntry> {
            self.entries.lock().unwrap_or_else(PoisonError::into_inner).clone()
        }
    }

    #[async_trait]
    impl HistoryRecorder for RecordingHistory {
        async fn record(&self, entry: HistoryEntry) -> Result<(), ServiceError> {
            if self.failing.load(Ordering::SeqCst) {
                return Err(ServiceError::Db("history store unavailable".into()));
            }
            self.entries.lock().unwrap_or_else(PoisonError::into_inner).push(entry);
            Ok(())
        }
    }
}
