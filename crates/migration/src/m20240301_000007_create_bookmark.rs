//! Create `bookmark` table linking users to saved comments.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Bookmark::Table)
                    .if_not_exists()
                    .col(integer(Bookmark::Id).primary_key().auto_increment())
                    .col(integer(Bookmark::UserId).not_null())
                    .col(integer(Bookmark::CommentId).not_null())
                    .col(timestamp_with_time_zone(Bookmark::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bookmark_user")
                            .from(Bookmark::Table, Bookmark::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bookmark_comment")
                            .from(Bookmark::Table, Bookmark::CommentId)
                            .to(Comment::Table, Comment::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Bookmark::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Bookmark { Table, Id, UserId, CommentId, CreatedAt }

#[derive(DeriveIden)]
enum User { Table, Id }

#[derive(DeriveIden)]
enum Comment { Table, Id }
