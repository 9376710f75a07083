use async_trait::async_trait;

use super::domain::Caller;
use super::errors::AccessError;

/// Loads a user together with their granted permissions.
#[async_trait]
pub trait CallerRepository: Send + Sync {
    async fn find_caller(&self, user_id: i32) -> Result<Option<Caller>, AccessError>;
}

/// In-memory callers for tests
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Mutex, PoisonError};

    #[derive(Default)]
    pub struct MockCallerRepository {
        callers: Mutex<HashMap<i32, Caller>>,
    }

    impl MockCallerRepository {
        pub fn insert(&self, caller: Caller) {
            self.callers.lock().unwrap_or_else(PoisonError::into_inner).insert(caller.id, caller);
        }
    }

    #[async_trait]
    impl CallerRepository for MockCallerRepository {
        async fn find_caller(&self, user_id: i32) -> Result<Option<Caller>, AccessError> {
            Ok(self.callers.lock().unwrap_or_else(PoisonError::into_inner).get(&user_id).cloned())
        }
    }
}
