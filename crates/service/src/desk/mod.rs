//! Client desk module: three-layer architecture (domain, repository, service).

pub mod domain;
pub mod repository;
pub mod repo;
pub mod rules;
pub mod service;

pub use service::{DeskConfig, DeskService};
