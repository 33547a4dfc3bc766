use std::sync::Arc;

use service::desk::{repository::DeskRepository, DeskConfig, DeskService};

/// Desk service over whichever repository the server was started with.
pub type Desk = DeskService<dyn DeskRepository>;

#[derive(Clone)]
pub struct ServerState {
    pub desk: Arc<Desk>,
}

impl ServerState {
    pub fn new(repo: Arc<dyn DeskRepository>, cfg: DeskConfig) -> Self {
        Self { desk: Arc::new(DeskService::new(repo, cfg)) }
    }
}
