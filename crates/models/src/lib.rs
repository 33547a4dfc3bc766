//! SeaORM entities for service profiles, managers and clients, plus the
//! field validation and row-level queries the service layer builds on.

pub mod errors;
pub mod db;
pub mod service_profile;
pub mod manager;
pub mod client;

#[cfg(test)]
mod tests;
