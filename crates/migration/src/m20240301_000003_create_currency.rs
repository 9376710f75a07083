//! Create `currency` table (ISO code plus display names).
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Currency::Table)
                    .if_not_exists()
                    .col(integer(Currency::Id).primary_key().auto_increment())
                    .col(string_len(Currency::Code, 8).not_null())
                    .col(string_len(Currency::Name, 128).not_null())
                    .col(string_len(Currency::LocalizedName, 128).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Currency::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Currency { Table, Id, Code, Name, LocalizedName }
