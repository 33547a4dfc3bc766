//! Create `clients` table.
//!
//! Deleting a manager leaves its clients in place with no assignment.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Clients::Table)
                    .if_not_exists()
                    .col(pk_auto(Clients::Id))
                    .col(string_len(Clients::CompanyName, 256).not_null())
                    .col(string_len(Clients::LegalForm, 64).not_null())
                    .col(integer(Clients::ServiceProfileId).not_null())
                    .col(integer_null(Clients::AssignedManagerId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_clients_service_profile")
                            .from(Clients::Table, Clients::ServiceProfileId)
                            .to(ServiceProfiles::Table, ServiceProfiles::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_clients_assigned_manager")
                            .from(Clients::Table, Clients::AssignedManagerId)
                            .to(Managers::Table, Managers::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Clients::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Clients {
    Table,
    Id,
    CompanyName,
    LegalForm,
    ServiceProfileId,
    AssignedManagerId,
}

#[derive(DeriveIden)]
enum ServiceProfiles { Table, Id }

#[derive(DeriveIden)]
enum Managers { Table, Id }
