use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Comment: lookups by target and by parent
        manager
            .create_index(
                Index::create()
                    .name("idx_comment_target")
                    .table(Comment::Table)
                    .col(Comment::ObjectId)
                    .col(Comment::ModelId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_comment_parent")
                    .table(Comment::Table)
                    .col(Comment::ParentId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_comment_status")
                    .table(Comment::Table)
                    .col(Comment::Status)
                    .to_owned(),
            )
            .await?;

        // UserPermission: one row per (user, permission)
        manager
            .create_index(
                Index::create()
                    .name("uniq_user_permission")
                    .table(UserPermission::Table)
                    .col(UserPermission::UserId)
                    .col(UserPermission::Permission)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Bookmark: one row per (user, comment)
        manager
            .create_index(
                Index::create()
                    .name("uniq_bookmark_user_comment")
                    .table(Bookmark::Table)
                    .col(Bookmark::UserId)
                    .col(Bookmark::CommentId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // History: entity lookups
        manager
            .create_index(
                Index::create()
                    .name("idx_history_entity")
                    .table(History::Table)
                    .col(History::EntityType)
                    .col(History::EntityId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_history_entity").table(History::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("uniq_bookmark_user_comment").table(Bookmark::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("uniq_user_permission").table(UserPermission::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_comment_status").table(Comment::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_comment_parent").table(Comment::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_comment_target").table(Comment::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Comment { Table, ObjectId, ModelId, ParentId, Status }

#[derive(DeriveIden)]
enum UserPermission { Table, UserId, Permission }

#[derive(DeriveIden)]
enum Bookmark { Table, UserId, CommentId }

#[derive(DeriveIden)]
enum History { Table, EntityType, EntityId }
