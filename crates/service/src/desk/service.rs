use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info, instrument};

use models::{client, manager, service_profile};

use super::domain::{
    ChangeProfileInput, ClientInput, ManagerInput, ManagerView, ManagerWithClients, NewServiceProfile,
    TransferInput,
};
use super::repository::DeskRepository;
use super::rules::{self, DEFAULT_MAX_CLIENTS_PER_MANAGER};
use crate::errors::ServiceError;

/// Rule settings for the desk service
#[derive(Clone, Debug)]
pub struct DeskConfig {
    pub max_clients_per_manager: u64,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self { max_clients_per_manager: DEFAULT_MAX_CLIENTS_PER_MANAGER }
    }
}

impl From<&configs::RulesConfig> for DeskConfig {
    fn from(cfg: &configs::RulesConfig) -> Self {
        Self { max_clients_per_manager: cfg.max_clients_per_manager }
    }
}

/// Manager/client/profile operations with the capacity and profile rules
/// applied, independent of the web framework.
///
/// # Examples
/// ```
/// use service::desk::{service::{DeskService, DeskConfig}, repository::memory::InMemoryDeskRepository};
/// use service::desk::domain::{NewServiceProfile, ManagerInput};
/// use std::sync::Arc;
/// let svc = DeskService::new(Arc::new(InMemoryDeskRepository::default()), DeskConfig::default());
/// let profile = tokio_test::block_on(svc.create_profile(NewServiceProfile { name: Some("Premium".into()) })).unwrap();
/// let input = ManagerInput { full_name: Some("Anna".into()), service_profile_id: Some(profile.id.into()) };
/// let view = tokio_test::block_on(svc.create_manager(input)).unwrap();
/// assert_eq!(view.profile_name.as_deref(), Some("Premium"));
/// ```
pub struct DeskService<R: DeskRepository + ?Sized> {
    repo: Arc<R>,
    cfg: DeskConfig,
}

impl<R: DeskRepository + ?Sized> DeskService<R> {
    pub fn new(repo: Arc<R>, cfg: DeskConfig) -> Self { Self { repo, cfg } }

    async fn require_profile(&self, id: i32) -> Result<service_profile::Model, ServiceError> {
        self.repo.get_profile(id).await?.ok_or_else(|| ServiceError::not_found("service profile"))
    }

    async fn require_manager(&self, id: i32) -> Result<manager::Model, ServiceError> {
        self.repo.get_manager(id).await?.ok_or_else(|| ServiceError::not_found("manager"))
    }

    async fn require_client(&self, id: i32) -> Result<client::Model, ServiceError> {
        self.repo.get_client(id).await?.ok_or_else(|| ServiceError::not_found("client"))
    }

    /// Capacity check for placing `client_id` (if it already exists) with `manager_id`.
    async fn ensure_room(&self, manager_id: i32, client_id: Option<i32>) -> Result<(), ServiceError> {
        let current = self.repo.count_clients_by_manager(manager_id, client_id).await?;
        debug!(manager_id, current, limit = self.cfg.max_clients_per_manager, "capacity check");
        rules::ensure_capacity(manager_id, current, self.cfg.max_clients_per_manager)?;
        Ok(())
    }

    // ---- service profiles ----

    #[instrument(skip(self, input))]
    pub async fn create_profile(&self, input: NewServiceProfile) -> Result<service_profile::Model, ServiceError> {
        let name = input.validate()?;
        let created = self.repo.insert_profile(&name).await?;
        info!(profile_id = created.id, name = %created.name, "service_profile_created");
        Ok(created)
    }

    pub async fn list_profiles(&self) -> Result<Vec<service_profile::Model>, ServiceError> {
        self.repo.list_profiles().await
    }

    // ---- managers ----

    #[instrument(skip(self, input))]
    pub async fn create_manager(&self, input: ManagerInput) -> Result<ManagerView, ServiceError> {
        let draft = input.validate()?;
        let profile = self.require_profile(draft.service_profile_id).await?;
        let created = self.repo.insert_manager(&draft.full_name, profile.id).await?;
        info!(manager_id = created.id, profile_id = profile.id, "manager_created");
        Ok(ManagerView { manager: created, profile_name: Some(profile.name) })
    }

    /// Every manager with its profile name and assigned clients.
    pub async fn list_managers(&self) -> Result<Vec<ManagerWithClients>, ServiceError> {
        let profiles: HashMap<i32, String> = self.repo
            .list_profiles()
            .await?
            .into_iter()
            .map(|p| (p.id, p.name))
            .collect();
        let managers = self.repo.list_managers().await?;
        let mut out = Vec::with_capacity(managers.len());
        for m in managers {
            let clients = self.repo.list_clients_by_manager(m.id).await?;
            out.push(ManagerWithClients {
                id: m.id,
                full_name: m.full_name,
                service_profile_id: m.service_profile_id,
                profile_name: profiles.get(&m.service_profile_id).cloned(),
                clients: clients.into_iter().map(Into::into).collect(),
            });
        }
        Ok(out)
    }

    pub async fn get_manager(&self, id: i32) -> Result<manager::Model, ServiceError> {
        self.require_manager(id).await
    }

    /// Rename and/or re-profile a manager. A profile change is refused while
    /// the manager holds clients of any other profile.
    #[instrument(skip(self, input), fields(manager_id = id))]
    pub async fn update_manager(&self, id: i32, input: ManagerInput) -> Result<ManagerView, ServiceError> {
        let draft = input.validate()?;
        let profile = self.require_profile(draft.service_profile_id).await?;
        self.require_manager(id).await?;
        let clients = self.repo.list_clients_by_manager(id).await?;
        rules::ensure_clients_compatible(id, profile.id, &clients)?;
        let updated = self.repo
            .update_manager(id, &draft.full_name, profile.id)
            .await?
            .ok_or_else(|| ServiceError::not_found("manager"))?;
        info!(manager_id = id, profile_id = profile.id, "manager_updated");
        Ok(ManagerView { manager: updated, profile_name: Some(profile.name) })
    }

    #[instrument(skip(self))]
    pub async fn delete_manager(&self, id: i32) -> Result<(), ServiceError> {
        if !self.repo.delete_manager(id).await? {
            return Err(ServiceError::not_found("manager"));
        }
        info!(manager_id = id, "manager_deleted");
        Ok(())
    }

    pub async fn manager_clients(&self, id: i32) -> Result<Vec<client::Model>, ServiceError> {
        self.require_manager(id).await?;
        self.repo.list_clients_by_manager(id).await
    }

    // ---- clients ----

    /// Create a client, optionally assigned to a manager of the same profile
    /// who still has room.
    #[instrument(skip(self, input))]
    pub async fn create_client(&self, input: ClientInput) -> Result<client::Model, ServiceError> {
        let fields = input.validate()?;
        if let Some(manager_id) = fields.assigned_manager_id {
            let manager = self.require_manager(manager_id).await?;
            self.require_profile(fields.service_profile_id).await?;
            rules::ensure_profile_match(fields.service_profile_id, manager.service_profile_id)?;
            self.ensure_room(manager_id, None).await?;
        } else {
            self.require_profile(fields.service_profile_id).await?;
        }
        let created = self.repo.insert_client(fields).await?;
        info!(client_id = created.id, manager_id = ?created.assigned_manager_id, "client_created");
        Ok(created)
    }

    pub async fn list_clients(&self) -> Result<Vec<client::Model>, ServiceError> {
        self.repo.list_clients().await
    }

    pub async fn get_client(&self, id: i32) -> Result<client::Model, ServiceError> {
        self.require_client(id).await
    }

    /// Overwrite a client. Omitting the manager unassigns the client; keeping
    /// the current manager does not count against its capacity.
    #[instrument(skip(self, input), fields(client_id = id))]
    pub async fn update_client(&self, id: i32, input: ClientInput) -> Result<client::Model, ServiceError> {
        let fields = input.validate()?;
        self.require_client(id).await?;
        self.require_profile(fields.service_profile_id).await?;
        if let Some(manager_id) = fields.assigned_manager_id {
            let manager = self.require_manager(manager_id).await?;
            rules::ensure_profile_match(fields.service_profile_id, manager.service_profile_id)?;
            self.ensure_room(manager_id, Some(id)).await?;
        }
        let updated = self.repo
            .update_client(id, fields)
            .await?
            .ok_or_else(|| ServiceError::not_found("client"))?;
        info!(client_id = id, manager_id = ?updated.assigned_manager_id, "client_updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete_client(&self, id: i32) -> Result<(), ServiceError> {
        if !self.repo.delete_client(id).await? {
            return Err(ServiceError::not_found("client"));
        }
        info!(client_id = id, "client_deleted");
        Ok(())
    }

    /// Move a client to another manager with the same service profile.
    #[instrument(skip(self, input), fields(client_id = id))]
    pub async fn transfer_client(&self, id: i32, input: TransferInput) -> Result<client::Model, ServiceError> {
        let new_manager_id = input.validate()?;
        let client = self.require_client(id).await?;
        let manager = self.require_manager(new_manager_id).await?;
        rules::ensure_profile_match(client.service_profile_id, manager.service_profile_id)?;
        self.ensure_room(new_manager_id, Some(id)).await?;
        let moved = self.repo
            .reassign_client(id, new_manager_id, None)
            .await?
            .ok_or_else(|| ServiceError::not_found("client"))?;
        info!(client_id = id, from = ?client.assigned_manager_id, to = new_manager_id, "client_transferred");
        Ok(moved)
    }

    /// Give a client a new service profile and a manager serving that profile
    /// in a single write.
    #[instrument(skip(self, input), fields(client_id = id))]
    pub async fn change_profile_and_transfer(
        &self,
        id: i32,
        input: ChangeProfileInput,
    ) -> Result<client::Model, ServiceError> {
        let (new_profile_id, new_manager_id) = input.validate()?;
        let client = self.require_client(id).await?;
        self.require_profile(new_profile_id).await?;
        let manager = self.require_manager(new_manager_id).await?;
        rules::ensure_profile_match(new_profile_id, manager.service_profile_id)?;
        self.ensure_room(new_manager_id, Some(id)).await?;
        let moved = self.repo
            .reassign_client(id, new_manager_id, Some(new_profile_id))
            .await?
            .ok_or_else(|| ServiceError::not_found("client"))?;
        info!(
            client_id = id,
            from_profile = client.service_profile_id,
            to_profile = new_profile_id,
            to_manager = new_manager_id,
            "client_profile_changed_and_transferred"
        );
        Ok(moved)
    }
}
