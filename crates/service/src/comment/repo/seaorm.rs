use chrono::Utc;
use models::comment::{self, CommentStatus};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Select, Set,
};

use crate::comment::domain::{
    CommentChanges, CommentFilter, CommentRecord, CommentTarget, CommentWithAuthor, NewCommentRecord,
};
use crate::comment::repository::CommentRepository;
use crate::errors::ServiceError;

pub struct SeaOrmCommentRepository {
    pub db: DatabaseConnection,
}

fn approved_on(target: &CommentTarget) -> Select<comment::Entity> {
    comment::Entity::find()
        .filter(comment::Column::ObjectId.eq(target.entity_type.as_str()))
        .filter(comment::Column::ModelId.eq(target.entity_id.as_str()))
        .filter(comment::Column::Status.eq(CommentStatus::Approve.as_str()))
}

fn filtered(filter: &CommentFilter) -> Select<comment::Entity> {
    let mut q = comment::Entity::find();
    if let Some(status) = filter.status {
        q = q.filter(comment::Column::Status.eq(status.as_str()));
    }
    q
}

impl SeaOrmCommentRepository {
    async fn with_authors(&self, q: Select<comment::Entity>) -> Result<Vec<CommentWithAuthor>, ServiceError> {
        let rows = q
            .order_by_asc(comment::Column::Id)
            .find_also_related(models::user::Entity)
            .all(&self.db)
            .await?;
        Ok(rows
            .into_iter()
            .map(|(c, u)| CommentWithAuthor { comment: c.into(), author: u.map(Into::into) })
            .collect())
    }
}

#[async_trait::async_trait]
impl CommentRepository for SeaOrmCommentRepository {
    async fn insert(&self, new: NewCommentRecord) -> Result<CommentRecord, ServiceError> {
        let created = comment::create(
            &self.db,
            comment::NewComment {
                user_id: new.user_id,
                object_id: new.target.entity_type,
                model_id: new.target.entity_id,
                text: new.text,
                parent_id: new.parent_id,
                status: new.status,
            },
        )
        .await?;
        Ok(created.into())
    }

    async fn find(&self, id: i32) -> Result<Option<CommentRecord>, ServiceError> {
        Ok(comment::Entity::find_by_id(id).one(&self.db).await?.map(Into::into))
    }

    async fn approved_roots(&self, target: &CommentTarget) -> Result<Vec<CommentWithAuthor>, ServiceError> {
        self.with_authors(approved_on(target).filter(comment::Column::ParentId.is_null())).await
    }

    async fn approved_replies(&self, parent_id: i32, target: &CommentTarget) -> Result<Vec<CommentWithAuthor>, ServiceError> {
        self.with_authors(approved_on(target).filter(comment::Column::ParentId.eq(parent_id))).await
    }

    async fn list(&self, filter: &CommentFilter, limit: u64, offset: u64) -> Result<Vec<CommentRecord>, ServiceError> {
        let rows = filtered(filter)
            .order_by_asc(comment::Column::Id)
            .limit(limit)
            .offset(offset)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn count(&self, filter: &CommentFilter) -> Result<u64, ServiceError> {
        Ok(filtered(filter).count(&self.db).await?)
    }

    async fn update(&self, id: i32, changes: &CommentChanges) -> Result<(), ServiceError> {
        let existing = comment::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| ServiceError::not_found("comment"))?;
        let mut am = existing.into_active_model();
        if let Some(v) = &changes.entity_type { am.object_id = Set(v.clone()); }
        if let Some(v) = &changes.entity_id { am.model_id = Set(v.clone()); }
        if let Some(v) = &changes.text { am.text = Set(v.clone()); }
        if let Some(v) = changes.parent_id { am.parent_id = Set(Some(v)); }
        if let Some(v) = changes.status { am.status = Set(v.as_str().to_string()); }
        am.updated_at = Set(Utc::now().into());
        am.update(&self.db).await?;
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        let res = comment::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }

    async fn is_bookmarked(&self, user_id: i32, comment_id: i32) -> Result<bool, ServiceError> {
        Ok(models::bookmark::exists(&self.db, user_id, comment_id).await?)
    }
}
