//! Create `user_permission` table with FK to `user`.
//!
//! One row per granted permission name, e.g. `comment edit`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserPermission::Table)
                    .if_not_exists()
                    .col(integer(UserPermission::Id).primary_key().auto_increment())
                    .col(integer(UserPermission::UserId).not_null())
                    .col(string_len(UserPermission::Permission, 64).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_permission_user")
                            .from(UserPermission::Table, UserPermission::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(UserPermission::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum UserPermission { Table, Id, UserId, Permission }

#[derive(DeriveIden)]
enum User { Table, Id }
