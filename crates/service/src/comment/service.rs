use std::collections::HashSet;
use std::sync::Arc;

use common::pagination::Pagination;
use models::comment::CommentStatus;
use tracing::{debug, info, instrument};

use super::domain::{
    CommentChanges, CommentFilter, CommentPage, CommentRecord, CommentTarget, CommentWithAuthor, ListCommentsQuery,
    NewCommentRecord, PrivilegedCommentInput, PublicCommentInput, ThreadedComment, UpdateCommentInput,
};
use super::repository::CommentRepository;
use super::validation::{non_blank, parse_id, parse_status, require_all, value_present};
use crate::access::{authorize, Caller, Permission};
use crate::errors::ServiceError;
use crate::history::{HistoryAction, HistoryEntry, HistoryRecorder};

/// Comment workflow independent of the web framework.
///
/// Every mutation checks permissions first, then validates, then writes the
/// comment, then appends one history entry. The two writes are separate: a
/// history failure is returned to the caller but the comment stays written.
pub struct CommentService {
    comments: Arc<dyn CommentRepository>,
    history: Arc<dyn HistoryRecorder>,
}

impl CommentService {
    pub fn new(comments: Arc<dyn CommentRepository>, history: Arc<dyn HistoryRecorder>) -> Self {
        Self { comments, history }
    }

    /// Approved top-level comments of a target with their approved replies.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::comment::{CommentService, domain::CommentTarget, repository::mock::MockCommentRepository};
    /// use service::history::recorder::mock::RecordingHistory;
    /// let svc = CommentService::new(Arc::new(MockCommentRepository::default()), Arc::new(RecordingHistory::default()));
    /// let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
    /// let thread = rt.block_on(svc.thread(&CommentTarget::new("Article", "1"), None)).unwrap();
    /// assert!(thread.is_empty());
    /// ```
    #[instrument(skip(self, viewer), fields(object = %target.entity_type, model = %target.entity_id))]
    pub async fn thread(&self, target: &CommentTarget, viewer: Option<&Caller>) -> Result<Vec<ThreadedComment>, ServiceError> {
        let roots = self.comments.approved_roots(target).await?;
        let mut out = Vec::with_capacity(roots.len());
        for root in roots {
            let replies = self.comments.approved_replies(root.comment.id, target).await?;
            let mut answers = Vec::with_capacity(replies.len());
            for reply in replies {
                answers.push(self.annotate(reply, viewer, None).await?);
            }
            out.push(self.annotate(root, viewer, Some(answers)).await?);
        }
        debug!(count = out.len(), "thread assembled");
        Ok(out)
    }

    async fn annotate(
        &self,
        item: CommentWithAuthor,
        viewer: Option<&Caller>,
        answers: Option<Vec<ThreadedComment>>,
    ) -> Result<ThreadedComment, ServiceError> {
        let is_bookmark = match viewer {
            Some(v) => self.comments.is_bookmarked(v.id, item.comment.id).await?,
            None => false,
        };
        Ok(ThreadedComment { comment: item.comment, user: item.author, is_bookmark, answers })
    }

    /// Create an approved comment owned by the caller.
    #[instrument(skip(self, caller, input, ip), fields(user_id = caller.id))]
    pub async fn create_public(
        &self,
        caller: &Caller,
        input: PublicCommentInput,
        ip: Option<String>,
    ) -> Result<CommentRecord, ServiceError> {
        let caller = authorize(Some(caller), &[])?;
        let object_name = non_blank(input.object_name.as_deref());
        let model_id = non_blank(input.model_id.as_deref());
        let text = non_blank(input.text.as_deref());
        require_all(&[("objectName", object_name.is_some()), ("modelId", model_id.is_some()), ("text", text.is_some())])?;
        let parent_id = parse_id("parentId", input.parent_id.as_ref())?;
        self.check_parent(parent_id, None).await?;

        let new = NewCommentRecord {
            user_id: caller.id,
            target: CommentTarget::new(object_name.unwrap_or_default(), model_id.unwrap_or_default()),
            text: text.unwrap_or_default().to_string(),
            parent_id,
            status: CommentStatus::Approve,
        };
        self.insert_and_record(caller, new, input.ip.or(ip)).await
    }

    /// Create a comment on behalf of any user with an explicit status.
    #[instrument(skip(self, caller, input, ip), fields(user_id = caller.id))]
    pub async fn create_privileged(
        &self,
        caller: &Caller,
        input: PrivilegedCommentInput,
        ip: Option<String>,
    ) -> Result<CommentRecord, ServiceError> {
        let caller = authorize(Some(caller), &[Permission::CommentCreate])?;
        let object_name = non_blank(input.object_name.as_deref());
        let model_id = non_blank(input.model_id.as_deref());
        let text = non_blank(input.text.as_deref());
        let status = non_blank(input.status.as_deref());
        require_all(&[
            ("objectName", object_name.is_some()),
            ("modelId", model_id.is_some()),
            ("text", text.is_some()),
            ("userId", value_present(input.user_id.as_ref())),
            ("status", status.is_some()),
        ])?;
        let user_id = parse_id("userId", input.user_id.as_ref())?.ok_or_else(|| ServiceError::required("userId"))?;
        let status = parse_status(status.unwrap_or_default())?;
        let parent_id = parse_id("parentId", input.parent_id.as_ref())?;
        self.check_parent(parent_id, None).await?;

        let new = NewCommentRecord {
            user_id,
            target: CommentTarget::new(object_name.unwrap_or_default(), model_id.unwrap_or_default()),
            text: text.unwrap_or_default().to_string(),
            parent_id,
            status,
        };
        self.insert_and_record(caller, new, input.ip.or(ip)).await
    }

    async fn insert_and_record(
        &self,
        caller: &Caller,
        new: NewCommentRecord,
        ip: Option<String>,
    ) -> Result<CommentRecord, ServiceError> {
        let created = self.comments.insert(new).await?;
        self.history.record(HistoryEntry::comment(HistoryAction::Create, caller.id, ip, created.id)).await?;
        info!(comment_id = created.id, owner_id = created.user_id, status = %created.status, "comment_created");
        Ok(created)
    }

    /// Paged listing for moderators.
    #[instrument(skip(self, caller), fields(user_id = caller.id))]
    pub async fn list(&self, caller: &Caller, query: ListCommentsQuery) -> Result<CommentPage, ServiceError> {
        authorize(Some(caller), &[Permission::CommentShow])?;
        let status = non_blank(query.status.as_deref()).map(parse_status).transpose()?;
        let filter = CommentFilter { status };
        let (limit, offset) = Pagination { limit: query.limit, offset: query.offset }.normalize();
        let items = self.comments.list(&filter, limit, offset).await?;
        let total = self.comments.count(&filter).await?;
        Ok(CommentPage { items, total })
    }

    #[instrument(skip(self, caller), fields(user_id = caller.id))]
    pub async fn get(&self, caller: &Caller, id: i32) -> Result<CommentRecord, ServiceError> {
        authorize(Some(caller), &[Permission::CommentShow])?;
        self.comments.find(id).await?.ok_or_else(|| ServiceError::not_found("comment"))
    }

    /// Merge the whitelisted, non-empty fields of `input` into comment `id`.
    #[instrument(skip(self, caller, input, ip), fields(user_id = caller.id))]
    pub async fn update(
        &self,
        caller: &Caller,
        id: i32,
        input: UpdateCommentInput,
        ip: Option<String>,
    ) -> Result<CommentRecord, ServiceError> {
        let caller = authorize(Some(caller), &[Permission::CommentEdit])?;
        if self.comments.find(id).await?.is_none() {
            return Err(ServiceError::not_found("comment"));
        }
        let changes = CommentChanges {
            entity_type: non_blank(input.object_name.as_deref()).map(str::to_string),
            entity_id: non_blank(input.model_id.as_deref()).map(str::to_string),
            text: non_blank(input.text.as_deref()).map(str::to_string),
            parent_id: parse_id("parentId", input.parent_id.as_ref())?,
            status: non_blank(input.status.as_deref()).map(parse_status).transpose()?,
        };
        self.check_parent(changes.parent_id, Some(id)).await?;
        if !changes.is_empty() {
            self.comments.update(id, &changes).await?;
        }
        self.history.record(HistoryEntry::comment(HistoryAction::Edit, caller.id, input.ip.or(ip), id)).await?;
        let saved = self.comments.find(id).await?.ok_or_else(|| ServiceError::not_found("comment"))?;
        info!(comment_id = id, changed = !changes.is_empty(), "comment_updated");
        Ok(saved)
    }

    #[instrument(skip(self, caller, ip), fields(user_id = caller.id))]
    pub async fn delete(&self, caller: &Caller, id: i32, ip: Option<String>) -> Result<(), ServiceError> {
        let caller = authorize(Some(caller), &[Permission::CommentDelete])?;
        if !self.comments.delete(id).await? {
            return Err(ServiceError::not_found("comment"));
        }
        self.history.record(HistoryEntry::comment(HistoryAction::Delete, caller.id, ip, id)).await?;
        info!(comment_id = id, "comment_deleted");
        Ok(())
    }

    /// The parent must exist and must not be `own_id` or any of its descendants.
    async fn check_parent(&self, parent_id: Option<i32>, own_id: Option<i32>) -> Result<(), ServiceError> {
        let Some(pid) = parent_id else { return Ok(()) };
        let mut seen = HashSet::new();
        let mut cursor = Some(pid);
        while let Some(id) = cursor {
            if own_id == Some(id) || !seen.insert(id) {
                return Err(ServiceError::invalid("parentId"));
            }
            match self.comments.find(id).await? {
                Some(ancestor) => cursor = ancestor.parent_id,
                None if id == pid => return Err(ServiceError::invalid("parentId")),
                None => break,
            }
        }
        Ok(())
    }
}
