//! Service layer for the client desk: business rules on top of `models`.
//! - Validation of request inputs lives in `desk::domain`.
//! - Capacity and profile rules live in `desk::rules`.
//! - Storage is behind the `DeskRepository` trait so the service runs against
//!   Postgres or an in-memory store.

pub mod errors;
pub mod desk;
#[cfg(test)]
pub mod test_support;
