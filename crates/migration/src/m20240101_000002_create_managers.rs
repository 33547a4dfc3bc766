//! Create `managers` table.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Managers::Table)
                    .if_not_exists()
                    .col(pk_auto(Managers::Id))
                    .col(string_len(Managers::FullName, 256).not_null())
                    .col(integer(Managers::ServiceProfileId).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_managers_service_profile")
                            .from(Managers::Table, Managers::ServiceProfileId)
                            .to(ServiceProfiles::Table, ServiceProfiles::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Managers::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Managers { Table, Id, FullName, ServiceProfileId }

#[derive(DeriveIden)]
enum ServiceProfiles { Table, Id }
