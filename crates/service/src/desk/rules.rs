//! Consistency rules between clients, managers and service profiles.
//!
//! Pure comparisons over values already read from storage. They run at call
//! time only; nothing here locks rows, so two concurrent requests may both
//! pass a capacity check.

use thiserror::Error;

use models::client;

/// Default number of clients a single manager may hold.
pub const DEFAULT_MAX_CLIENTS_PER_MANAGER: u64 = 5;

/// A business rule rejected the operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleViolation {
    #[error("manager {manager_id} already has the maximum of {limit} clients")]
    CapacityReached { manager_id: i32, limit: u64 },
    #[error("client service profile {client_profile_id} does not match manager service profile {manager_profile_id}")]
    ProfileMismatch { client_profile_id: i32, manager_profile_id: i32 },
    #[error("cannot change the service profile of manager {manager_id}: {count} assigned client(s) use a different profile")]
    IncompatibleClients { manager_id: i32, count: usize },
}

/// `current` is the number of clients already held, not counting the client
/// being placed.
pub fn ensure_capacity(manager_id: i32, current: u64, limit: u64) -> Result<(), RuleViolation> {
    if current >= limit {
        return Err(RuleViolation::CapacityReached { manager_id, limit });
    }
    Ok(())
}

pub fn ensure_profile_match(client_profile_id: i32, manager_profile_id: i32) -> Result<(), RuleViolation> {
    if client_profile_id != manager_profile_id {
        return Err(RuleViolation::ProfileMismatch { client_profile_id, manager_profile_id });
    }
    Ok(())
}

/// Every client in `clients` must already use `new_profile_id`.
pub fn ensure_clients_compatible(
    manager_id: i32,
    new_profile_id: i32,
    clients: &[client::Model],
) -> Result<(), RuleViolation> {
    let count = clients.iter().filter(|c| c.service_profile_id != new_profile_id).count();
    if count > 0 {
        return Err(RuleViolation::IncompatibleClients { manager_id, count });
    }
    Ok(())
}
