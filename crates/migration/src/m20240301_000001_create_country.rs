//! Create `country` table.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Country::Table)
                    .if_not_exists()
                    .col(integer(Country::Id).primary_key().auto_increment())
                    .col(string_len(Country::Code, 8).unique_key().not_null())
                    .col(string_len(Country::Name, 128).not_null())
                    .col(string_len(Country::LocalizedName, 128).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Country::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Country { Table, Id, Code, Name, LocalizedName }
