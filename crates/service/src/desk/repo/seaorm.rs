use sea_orm::{DatabaseConnection, EntityTrait};

use models::{client, client::ClientFields, manager, service_profile};

use crate::desk::repository::DeskRepository;
use crate::errors::ServiceError;

pub struct SeaOrmDeskRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmDeskRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

fn db_err(e: sea_orm::DbErr) -> ServiceError {
    ServiceError::Db(e.to_string())
}

#[async_trait::async_trait]
impl DeskRepository for SeaOrmDeskRepository {
    async fn insert_profile(&self, name: &str) -> Result<service_profile::Model, ServiceError> {
        Ok(service_profile::create(&self.db, name).await?)
    }

    async fn get_profile(&self, id: i32) -> Result<Option<service_profile::Model>, ServiceError> {
        service_profile::Entity::find_by_id(id).one(&self.db).await.map_err(db_err)
    }

    async fn list_profiles(&self) -> Result<Vec<service_profile::Model>, ServiceError> {
        Ok(service_profile::list(&self.db).await?)
    }

    async fn insert_manager(&self, full_name: &str, service_profile_id: i32) -> Result<manager::Model, ServiceError> {
        Ok(manager::create(&self.db, full_name, service_profile_id).await?)
    }

    async fn get_manager(&self, id: i32) -> Result<Option<manager::Model>, ServiceError> {
        manager::Entity::find_by_id(id).one(&self.db).await.map_err(db_err)
    }

    async fn list_managers(&self) -> Result<Vec<manager::Model>, ServiceError> {
        Ok(manager::list(&self.db).await?)
    }

    async fn update_manager(&self, id: i32, full_name: &str, service_profile_id: i32) -> Result<Option<manager::Model>, ServiceError> {
        Ok(manager::update(&self.db, id, full_name, service_profile_id).await?)
    }

    async fn delete_manager(&self, id: i32) -> Result<bool, ServiceError> {
        let res = manager::Entity::delete_by_id(id).exec(&self.db).await.map_err(db_err)?;
        Ok(res.rows_affected > 0)
    }

    async fn insert_client(&self, fields: ClientFields) -> Result<client::Model, ServiceError> {
        Ok(client::create(&self.db, fields).await?)
    }

    async fn get_client(&self, id: i32) -> Result<Option<client::Model>, ServiceError> {
        client::Entity::find_by_id(id).one(&self.db).await.map_err(db_err)
    }

    async fn list_clients(&self) -> Result<Vec<client::Model>, ServiceError> {
        Ok(client::list(&self.db).await?)
    }

    async fn list_clients_by_manager(&self, manager_id: i32) -> Result<Vec<client::Model>, ServiceError> {
        Ok(client::list_by_manager(&self.db, manager_id).await?)
    }

    async fn count_clients_by_manager(&self, manager_id: i32, excluding: Option<i32>) -> Result<u64, ServiceError> {
        Ok(client::count_by_manager(&self.db, manager_id, excluding).await?)
    }

    async fn update_client(&self, id: i32, fields: ClientFields) -> Result<Option<client::Model>, ServiceError> {
        Ok(client::update(&self.db, id, fields).await?)
    }

    async fn reassign_client(&self, id: i32, manager_id: i32, service_profile_id: Option<i32>) -> Result<Option<client::Model>, ServiceError> {
        Ok(client::reassign(&self.db, id, manager_id, service_profile_id).await?)
    }

    async fn delete_client(&self, id: i32) -> Result<bool, ServiceError> {
        let res = client::Entity::delete_by_id(id).exec(&self.db).await.map_err(db_err)?;
        Ok(res.rows_affected > 0)
    }
}
