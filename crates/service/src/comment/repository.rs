use async_trait::async_trait;

use super::domain::{CommentChanges, CommentFilter, CommentRecord, CommentTarget, CommentWithAuthor, NewCommentRecord};
use crate::errors::ServiceError;

/// Persistence needed by the comment workflow.
#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn insert(&self, new: NewCommentRecord) -> Result<CommentRecord, ServiceError>;
    async fn find(&self, id: i32) -> Result<Option<CommentRecord>, ServiceError>;
    /// Approved top-level comments of a target in id order.
    async fn approved_roots(&self, target: &CommentTarget) -> Result<Vec<CommentWithAuthor>, ServiceError>;
    /// Approved direct replies of `parent_id` on the same target in id order.
    async fn approved_replies(&self, parent_id: i32, target: &CommentTarget) -> Result<Vec<CommentWithAuthor>, ServiceError>;
    async fn list(&self, filter: &CommentFilter, limit: u64, offset: u64) -> Result<Vec<CommentRecord>, ServiceError>;
    async fn count(&self, filter: &CommentFilter) -> Result<u64, ServiceError>;
    async fn update(&self, id: i32, changes: &CommentChanges) -> Result<(), ServiceError>;
    /// Removes the comment and its replies; false when nothing matched.
    async fn delete(&self, id: i32) -> Result<bool, ServiceError>;
    async fn is_bookmarked(&self, user_id: i32, comment_id: i32) -> Result<bool, ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::{BTreeMap, HashMap, HashSet};
    use std::sync::{Mutex, MutexGuard, PoisonError};

    use chrono::Utc;
    use models::comment::CommentStatus;

    use crate::comment::domain::AuthorProfile;

    #[derive(Default)]
    struct State {
        comments: BTreeMap<i32, CommentRecord>,
        authors: HashMap<i32, AuthorProfile>,
        bookmarks: HashSet<(i32, i32)>,
        next_id: i32,
        calls: usize,
    }

    #[derive(Default)]
    pub struct MockCommentRepository {
        state: Mutex<State>,
    }

    impl MockCommentRepository {
        fn state(&self) -> MutexGuard<'_, State> { self.state.lock().unwrap_or_else(PoisonError::into_inner) }

        fn touch(&self) -> MutexGuard<'_, State> {
            let mut st = self.state();
            st.calls += 1;
            st
        }

        pub fn add_author(&self, user_id: i32, profile: AuthorProfile) { self.state().authors.insert(user_id, profile); }

        pub fn add_bookmark(&self, user_id: i32, comment_id: i32) { self.state().bookmarks.insert((user_id, comment_id)); }

        /// Number of repository calls made so far, reads included.
        pub fn calls(&self) -> usize { self.state().calls }

        pub fn len(&self) -> usize { self.state().comments.len() }

        pub fn is_empty(&self) -> bool { self.len() == 0 }

        fn with_author(st: &State, c: &CommentRecord) -> CommentWithAuthor {
            CommentWithAuthor { comment: c.clone(), author: st.authors.get(&c.user_id).cloned() }
        }
    }

    fn matches(filter: &CommentFilter, c: &CommentRecord) -> bool { filter.status.map_or(true, |s| c.status == s) }

    #[async_trait]
    impl CommentRepository for MockCommentRepository {
        async fn insert(&self, new: NewCommentRecord) -> Result<CommentRecord, ServiceError> {
            let mut st = self.touch();
            st.next_id += 1;
            let now = Utc::now().fixed_offset();
            let rec = CommentRecord {
                id: st.next_id,
                user_id: new.user_id,
                target: new.target,
                text: new.text,
                parent_id: new.parent_id,
                status: new.status,
                created_at: now,
                updated_at: now,
            };
            st.comments.insert(rec.id, rec.clone());
            Ok(rec)
        }

        async fn find(&self, id: i32) -> Result<Option<CommentRecord>, ServiceError> {
            Ok(self.touch().comments.get(&id).cloned())
        }

        async fn approved_roots(&self, target: &CommentTarget) -> Result<Vec<CommentWithAuthor>, ServiceError> {
            let st = self.touch();
            Ok(st
                .comments
                .values()
                .filter(|c| c.parent_id.is_none() && c.status == CommentStatus::Approve && &c.target == target)
                .map(|c| Self::with_author(&st, c))
                .collect())
        }

        async fn approved_replies(&self, parent_id: i32, target: &CommentTarget) -> Result<Vec<CommentWithAuthor>, ServiceError> {
            let st = self.touch();
            Ok(st
                .comments
                .values()
                .filter(|c| c.parent_id == Some(parent_id) && c.status == CommentStatus::Approve && &c.target == target)
                .map(|c| Self::with_author(&st, c))
                .collect())
        }

        async fn list(&self, filter: &CommentFilter, limit: u64, offset: u64) -> Result<Vec<CommentRecord>, ServiceError> {
            let st = self.touch();
            Ok(st
                .comments
                .values()
                .filter(|c| matches(filter, c))
                .skip(offset as usize)
                .take(limit as usize)
                .cloned()
                .collect())
        }

        async fn count(&self, filter: &CommentFilter) -> Result<u64, ServiceError> {
            Ok(self.touch().comments.values().filter(|c| matches(filter, c)).count() as u64)
        }

        async fn update(&self, id: i32, changes: &CommentChanges) -> Result<(), ServiceError> {
            let mut st = self.touch();
            let c = st.comments.get_mut(&id).ok_or_else(|| ServiceError::not_found("comment"))?;
            if let Some(v) = &changes.entity_type { c.target.entity_type = v.clone(); }
            if let Some(v) = &changes.entity_id { c.target.entity_id = v.clone(); }
            if let Some(v) = &changes.text { c.text = v.clone(); }
            if let Some(v) = changes.parent_id { c.parent_id = Some(v); }
            if let Some(v) = changes.status { c.status = v; }
            c.updated_at = Utc::now().fixed_offset();
            Ok(())
        }

        async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
            let mut st = self.touch();
            if st.comments.remove(&id).is_none() {
                return Ok(false);
            }
            // same outcome as the ON DELETE CASCADE chain in SQL
            let mut removed = vec![id];
            let mut frontier = vec![id];
            while let Some(parent) = frontier.pop() {
                let children: Vec<i32> =
                    st.comments.values().filter(|c| c.parent_id == Some(parent)).map(|c| c.id).collect();
                for child in children {
                    st.comments.remove(&child);
                    removed.push(child);
                    frontier.push(child);
                }
            }
            st.bookmarks.retain(|(_, comment_id)| !removed.contains(comment_id));
            Ok(true)
        }

        async fn is_bookmarked(&self, user_id: i32, comment_id: i32) -> Result<bool, ServiceError> {
            Ok(self.touch().bookmarks.contains(&(user_id, comment_id)))
        }
    }
}
