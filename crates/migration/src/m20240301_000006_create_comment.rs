//! Create `comment` table with FKs to `user` and to itself (replies).
//!
//! `object_id` holds the commented entity type, `model_id` its identifier.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Comment::Table)
                    .if_not_exists()
                    .col(integer(Comment::Id).primary_key().auto_increment())
                    .col(integer(Comment::UserId).not_null())
                    .col(string_len(Comment::ObjectId, 128).not_null())
                    .col(string_len(Comment::ModelId, 128).not_null())
                    .col(text(Comment::Text).not_null())
                    .col(
                        ColumnDef::new(Comment::ParentId)
                            .integer()
                            .null(),
                    )
                    .col(string_len(Comment::Status, 16).not_null().default("NEW"))
                    .col(timestamp_with_time_zone(Comment::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Comment::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_comment_user")
                            .from(Comment::Table, Comment::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    // Removing a thread root removes its replies.
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_comment_parent")
                            .from(Comment::Table, Comment::ParentId)
                            .to(Comment::Table, Comment::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Comment::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Comment { Table, Id, UserId, ObjectId, ModelId, Text, ParentId, Status, CreatedAt, UpdatedAt }

#[derive(DeriveIden)]
enum User { Table, Id }
