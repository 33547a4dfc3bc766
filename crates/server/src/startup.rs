use std::sync::Arc;

use common::utils::logging::{init_logging, LogFormat};
use dotenvy::dotenv;
use migration::MigratorTrait;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use configs::AppConfig;
use models::db::{connect_with_config, DatabaseConfig};
use service::desk::{repo::seaorm::SeaOrmDeskRepository, repository::DeskRepository, DeskConfig};

use crate::routes;
use crate::state::ServerState;

// The browser frontend is served from another origin
fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

/// Public entry: load config, connect and migrate the database, then serve
/// until Ctrl+C.
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    let cfg = AppConfig::load_or_env()?;
    init_logging(LogFormat::from_name(&cfg.logging.format));

    let db = connect_with_config(&DatabaseConfig::from_app(&cfg.database)).await?;
    if cfg.database.auto_migrate {
        migration::Migrator::up(&db, None).await?;
        info!("database migrations applied");
    }

    let repo: Arc<dyn DeskRepository> = Arc::new(SeaOrmDeskRepository::new(db));
    let state = ServerState::new(repo, DeskConfig::from(&cfg.rules));
    let app = routes::build_router(state, build_cors());

    let listener = TcpListener::bind((cfg.server.host.as_str(), cfg.server.port)).await?;
    let addr = listener.local_addr()?;
    info!(%addr, max_clients_per_manager = cfg.rules.max_clients_per_manager, "client desk server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}
