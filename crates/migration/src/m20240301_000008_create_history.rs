//! Create `history` table.
//!
//! Append-only audit trail; rows outlive the users and entities they mention,
//! so there are no foreign keys here.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(History::Table)
                    .if_not_exists()
                    .col(integer(History::Id).primary_key().auto_increment())
                    .col(
                        ColumnDef::new(History::UserId)
                            .integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(History::Ip)
                            .string_len(64)
                            .null(),
                    )
                    .col(string_len(History::Action, 16).not_null())
                    .col(string_len(History::EntityType, 64).not_null())
                    .col(
                        ColumnDef::new(History::EntityId)
                            .integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(History::EntityName)
                            .string_len(255)
                            .null(),
                    )
                    .col(timestamp_with_time_zone(History::CreatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(History::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum History { Table, Id, UserId, Ip, Action, EntityType, EntityId, EntityName, CreatedAt }
