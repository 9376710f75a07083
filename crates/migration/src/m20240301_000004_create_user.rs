//! Create `user` table.
//!
//! Only the profile fields shown next to comments live here.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(integer(User::Id).primary_key().auto_increment())
                    .col(string_len(User::Email, 255).unique_key().not_null())
                    .col(string_len(User::FirstName, 128).not_null())
                    .col(string_len(User::LastName, 128).not_null())
                    .col(
                        ColumnDef::new(User::MiddleName)
                            .string_len(128)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(User::Photo)
                            .string_len(512)
                            .null(),
                    )
                    .col(timestamp_with_time_zone(User::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(User::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(User::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum User { Table, Id, Email, FirstName, LastName, MiddleName, Photo, CreatedAt, UpdatedAt }
