use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Clients: per-manager lookups and capacity counts
        manager
            .create_index(
                Index::create()
                    .name("idx_clients_assigned_manager")
                    .table(Clients::Table)
                    .col(Clients::AssignedManagerId)
                    .to_owned(),
            )
            .await?;

        // Managers: index on service_profile_id
        manager
            .create_index(
                Index::create()
                    .name("idx_managers_service_profile")
                    .table(Managers::Table)
                    .col(Managers::ServiceProfileId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_clients_assigned_manager").table(Clients::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_managers_service_profile").table(Managers::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Clients { Table, AssignedManagerId }

#[derive(DeriveIden)]
enum Managers { Table, ServiceProfileId }
