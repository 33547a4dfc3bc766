use async_trait::async_trait;

use models::{client, client::ClientFields, manager, service_profile};

use crate::errors::ServiceError;

/// Row-level persistence for profiles, managers and clients. Holds no
/// business rules; `DeskService` decides what may be written.
#[async_trait]
pub trait DeskRepository: Send + Sync {
    async fn insert_profile(&self, name: &str) -> Result<service_profile::Model, ServiceError>;
    async fn get_profile(&self, id: i32) -> Result<Option<service_profile::Model>, ServiceError>;
    async fn list_profiles(&self) -> Result<Vec<service_profile::Model>, ServiceError>;

    async fn insert_manager(&self, full_name: &str, service_profile_id: i32) -> Result<manager::Model, ServiceError>;
    async fn get_manager(&self, id: i32) -> Result<Option<manager::Model>, ServiceError>;
    async fn list_managers(&self) -> Result<Vec<manager::Model>, ServiceError>;
    async fn update_manager(&self, id: i32, full_name: &str, service_profile_id: i32) -> Result<Option<manager::Model>, ServiceError>;
    /// Clients of a deleted manager become unassigned.
    async fn delete_manager(&self, id: i32) -> Result<bool, ServiceError>;

    async fn insert_client(&self, fields: ClientFields) -> Result<client::Model, ServiceError>;
    async fn get_client(&self, id: i32) -> Result<Option<client::Model>, ServiceError>;
    async fn list_clients(&self) -> Result<Vec<client::Model>, ServiceError>;
    async fn list_clients_by_manager(&self, manager_id: i32) -> Result<Vec<client::Model>, ServiceError>;
    async fn count_clients_by_manager(&self, manager_id: i32, excluding: Option<i32>) -> Result<u64, ServiceError>;
    async fn update_client(&self, id: i32, fields: ClientFields) -> Result<Option<client::Model>, ServiceError>;
    async fn reassign_client(&self, id: i32, manager_id: i32, service_profile_id: Option<i32>) -> Result<Option<client::Model>, ServiceError>;
    async fn delete_client(&self, id: i32) -> Result<bool, ServiceError>;
}

/// In-memory repository for tests and doc examples. Mirrors the foreign keys
/// of the SQL schema, including `ON DELETE SET NULL` for client assignment.
pub mod memory {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::{Mutex, MutexGuard};

    #[derive(Default)]
    struct Tables {
        profiles: BTreeMap<i32, service_profile::Model>,
        managers: BTreeMap<i32, manager::Model>,
        clients: BTreeMap<i32, client::Model>,
        next_profile: i32,
        next_manager: i32,
        next_client: i32,
    }

    fn next(seq: &mut i32) -> i32 {
        *seq += 1;
        *seq
    }

    #[derive(Default)]
    pub struct InMemoryDeskRepository {
        tables: Mutex<Tables>,
    }

    impl InMemoryDeskRepository {
        fn tables(&self) -> Result<MutexGuard<'_, Tables>, ServiceError> {
            self.tables.lock().map_err(|_| ServiceError::Db("in-memory store poisoned".into()))
        }
    }

    impl Tables {
        fn check_profile_fk(&self, id: i32) -> Result<(), ServiceError> {
            if self.profiles.contains_key(&id) { Ok(()) } else { Err(ServiceError::Db(format!("foreign key violation: service_profiles.id={id}"))) }
        }

        fn check_client_fks(&self, fields: &ClientFields) -> Result<(), ServiceError> {
            self.check_profile_fk(fields.service_profile_id)?;
            match fields.assigned_manager_id {
                Some(m) if !self.managers.contains_key(&m) => Err(ServiceError::Db(format!("foreign key violation: managers.id={m}"))),
                _ => Ok(()),
            }
        }
    }

    #[async_trait]
    impl DeskRepository for InMemoryDeskRepository {
        async fn insert_profile(&self, name: &str) -> Result<service_profile::Model, ServiceError> {
            let name = service_profile::validate_name(name)?;
            let mut t = self.tables()?;
            let id = next(&mut t.next_profile);
            let row = service_profile::Model { id, name };
            t.profiles.insert(id, row.clone());
            Ok(row)
        }

        async fn get_profile(&self, id: i32) -> Result<Option<service_profile::Model>, ServiceError> {
            Ok(self.tables()?.profiles.get(&id).cloned())
        }

        async fn list_profiles(&self) -> Result<Vec<service_profile::Model>, ServiceError> {
            Ok(self.tables()?.profiles.values().cloned().collect())
        }

        async fn insert_manager(&self, full_name: &str, service_profile_id: i32) -> Result<manager::Model, ServiceError> {
            let full_name = manager::validate_full_name(full_name)?;
            let mut t = self.tables()?;
            t.check_profile_fk(service_profile_id)?;
            let id = next(&mut t.next_manager);
            let row = manager::Model { id, full_name, service_profile_id };
            t.managers.insert(id, row.clone());
            Ok(row)
        }

        async fn get_manager(&self, id: i32) -> Result<Option<manager::Model>, ServiceError> {
            Ok(self.tables()?.managers.get(&id).cloned())
        }

        async fn list_managers(&self) -> Result<Vec<manager::Model>, ServiceError> {
            Ok(self.tables()?.managers.values().cloned().collect())
        }

        async fn update_manager(&self, id: i32, full_name: &str, service_profile_id: i32) -> Result<Option<manager::Model>, ServiceError> {
            let full_name = manager::validate_full_name(full_name)?;
            let mut t = self.tables()?;
            t.check_profile_fk(service_profile_id)?;
            let Some(row) = t.managers.get_mut(&id) else { return Ok(None) };
            row.full_name = full_name;
            row.service_profile_id = service_profile_id;
            Ok(Some(row.clone()))
        }

        async fn delete_manager(&self, id: i32) -> Result<bool, ServiceError> {
            let mut t = self.tables()?;
            if t.managers.remove(&id).is_none() {
                return Ok(false);
            }
            for c in t.clients.values_mut().filter(|c| c.assigned_manager_id == Some(id)) {
                c.assigned_manager_id = None;
            }
            Ok(true)
        }

        async fn insert_client(&self, fields: ClientFields) -> Result<client::Model, ServiceError> {
            let company_name = client::validate_company_name(&fields.company_name)?;
            let legal_form = client::validate_legal_form(&fields.legal_form)?;
            let mut t = self.tables()?;
            t.check_client_fks(&fields)?;
            let id = next(&mut t.next_client);
            let row = client::Model {
                id,
                company_name,
                legal_form,
                service_profile_id: fields.service_profile_id,
                assigned_manager_id: fields.assigned_manager_id,
            };
            t.clients.insert(id, row.clone());
            Ok(row)
        }

        async fn get_client(&self, id: i32) -> Result<Option<client::Model>, ServiceError> {
            Ok(self.tables()?.clients.get(&id).cloned())
        }

        async fn list_clients(&self) -> Result<Vec<client::Model>, ServiceError> {
            Ok(self.tables()?.clients.values().cloned().collect())
        }

        async fn list_clients_by_manager(&self, manager_id: i32) -> Result<Vec<client::Model>, ServiceError> {
            Ok(self.tables()?
                .clients
                .values()
                .filter(|c| c.assigned_manager_id == Some(manager_id))
                .cloned()
                .collect())
        }

        async fn count_clients_by_manager(&self, manager_id: i32, excluding: Option<i32>) -> Result<u64, ServiceError> {
            let n = self.tables()?
                .clients
                .values()
                .filter(|c| c.assigned_manager_id == Some(manager_id) && Some(c.id) != excluding)
                .count();
            Ok(n as u64)
        }

        async fn update_client(&self, id: i32, fields: ClientFields) -> Result<Option<client::Model>, ServiceError> {
            let company_name = client::validate_company_name(&fields.company_name)?;
            let legal_form = client::validate_legal_form(&fields.legal_form)?;
            let mut t = self.tables()?;
            if !t.clients.contains_key(&id) {
                return Ok(None);
            }
            t.check_client_fks(&fields)?;
            let Some(row) = t.clients.get_mut(&id) else { return Ok(None) };
            row.company_name = company_name;
            row.legal_form = legal_form;
            row.service_profile_id = fields.service_profile_id;
            row.assigned_manager_id = fields.assigned_manager_id;
            Ok(Some(row.clone()))
        }

        async fn reassign_client(&self, id: i32, manager_id: i32, service_profile_id: Option<i32>) -> Result<Option<client::Model>, ServiceError> {
            let mut t = self.tables()?;
            if !t.managers.contains_key(&manager_id) {
                return Err(ServiceError::Db(format!("foreign key violation: managers.id={manager_id}")));
            }
            if let Some(p) = service_profile_id {
                t.check_profile_fk(p)?;
            }
            let Some(row) = t.clients.get_mut(&id) else { return Ok(None) };
            row.assigned_manager_id = Some(manager_id);
            if let Some(p) = service_profile_id {
                row.service_profile_id = p;
            }
            Ok(Some(row.clone()))
        }

        async fn delete_client(&self, id: i32) -> Result<bool, ServiceError> {
            Ok(self.tables()?.clients.remove(&id).is_some())
        }
    }

}
