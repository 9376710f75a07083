#![cfg(test)]
//! Shared fixtures for service unit tests.

use std::sync::Arc;

use models::comment::CommentStatus;

use crate::access::{Caller, Permission};
use crate::comment::domain::{CommentRecord, CommentTarget, NewCommentRecord};
use crate::comment::repository::mock::MockCommentRepository;
use crate::comment::repository::CommentRepository;
use crate::comment::CommentService;
use crate::history::recorder::mock::RecordingHistory;

/// Moderator holding every comment permission.
pub fn admin() -> Caller { Caller::new(1, "Ada Admin").with_permissions(Permission::ALL) }

/// Authenticated user without permissions.
pub fn reader() -> Caller { Caller::new(2, "Rita Reader") }

pub struct Fixture {
    pub service: CommentService,
    pub comments: Arc<MockCommentRepository>,
    pub history: Arc<RecordingHistory>,
}

impl Fixture {
    pub fn new() -> Self {
        let comments = Arc::new(MockCommentRepository::default());
        let history = Arc::new(RecordingHistory::default());
        let service = CommentService::new(comments.clone(), history.clone());
        Self { service, comments, history }
    }

    /// Approved comment by `reader()` written straight to the repository.
    pub async fn seed(&self, object: &str, model: &str, text: &str, parent_id: Option<i32>) -> CommentRecord {
        self.comments
            .insert(NewCommentRecord {
                user_id: reader().id,
                target: CommentTarget::new(object, model),
                text: text.into(),
                parent_id,
                status: CommentStatus::Approve,
            })
            .await
            .unwrap()
    }
}
