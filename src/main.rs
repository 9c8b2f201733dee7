use std::sync::Arc;

use advising_admin::config::Config;
use advising_admin::identity::{DemoIdentityProvider, FilePersistence, IdentityContext};
use advising_admin::{AdminState, AdvisingStorage, admin_router};
use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = Config::from_env()?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        database_url = %cfg.database_url,
        listen_addr = %cfg.listen_addr,
        loglevel = %cfg.loglevel,
        identity_store = %cfg.identity.storage_path.display()
    );

    let storage = AdvisingStorage::connect(&cfg.database_url).await?;

    let identity = IdentityContext::load(
        Arc::new(FilePersistence::new(cfg.identity.storage_path.clone())),
        Arc::new(DemoIdentityProvider::new(cfg.identity.email_domain.clone())),
    )?
    .into_shared();

    let app = admin_router(AdminState::new(storage), identity);

    let listener = TcpListener::bind(cfg.listen_addr.as_str()).await?;
    info!("HTTP server listening on {}", cfg.listen_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
