//! Create `service_profiles` table.
//!
//! Categories that both managers and clients point at.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ServiceProfiles::Table)
                    .if_not_exists()
                    .col(pk_auto(ServiceProfiles::Id))
                    .col(string_len(ServiceProfiles::Name, 128).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(ServiceProfiles::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum ServiceProfiles { Table, Id, Name }
