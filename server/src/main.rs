//! Weapon record HTTP server.
//!
//! # Usage
//!
//! ```bash
//! # Start PostgreSQL
//! docker run -d -p 5432:5432 -e POSTGRES_PASSWORD=postgres -e POSTGRES_DB=armory postgres:16
//!
//! # Run server
//! SEED_MODE=append cargo run --bin armory-server
//! ```

use anyhow::Context as _;
use armory_core::audit::AuditingStore;
use armory_core::environment::{Clock, SystemClock};
use armory_core::seed::{default_weapons, seed_store};
use armory_core::{WeaponService, WeaponStore};
use armory_postgres::PostgresWeaponStore;
use armory_server::{Config, lifecycle::shutdown_signal};
use armory_web::{AppState, build_router};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,armory=debug,sqlx=warn,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting weapon record server");

    let config = Config::from_env();
    info!(
        bind = %config.server.bind_address(),
        audit = config.audit.enabled,
        seed = ?config.seed,
        "Configuration loaded"
    );

    info!("Connecting to document store...");
    let pool = PgPoolOptions::new()
        .max_connections(config.postgres.max_connections)
        .min_connections(config.postgres.min_connections)
        .acquire_timeout(config.postgres.connect_timeout())
        .connect(&config.postgres.url)
        .await
        .context("failed to connect to PostgreSQL")?;

    let postgres = PostgresWeaponStore::from_pool(pool);
    postgres.migrate().await.context("failed to prepare weapons table")?;
    info!("Document store ready");

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let store: Arc<dyn WeaponStore> = Arc::new(AuditingStore::new(
        postgres,
        config.audit.to_audit_config(),
        clock.clone(),
    ));

    if let Some(mode) = config.seed {
        let report = seed_store(store.as_ref(), clock.as_ref(), default_weapons(), mode)
            .await
            .context("failed to seed weapons")?;
        info!(
            inserted = report.inserted,
            skipped = report.skipped,
            ?mode,
            "Seeded weapon records"
        );
    }

    let app = build_router(AppState::new(WeaponService::new(store, clock)));

    let listener = tokio::net::TcpListener::bind(config.server.bind_address())
        .await
        .with_context(|| format!("failed to bind {}", config.server.bind_address()))?;
    info!(addr = %config.server.bind_address(), "HTTP server listening");

    let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();
    let mut server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = stop_rx.await;
            })
            .await
    });

    tokio::select! {
        joined = &mut server => {
            joined.context("server task panicked")??;
            return Ok(());
        },
        () = shutdown_signal() => {},
    }

    let _ = stop_tx.send(());
    match tokio::time::timeout(config.server.shutdown_timeout(), server).await {
        Ok(joined) => joined.context("server task panicked")??,
        Err(_) => warn!(
            timeout_secs = config.server.shutdown_timeout,
            "Graceful shutdown timed out, dropping open connections"
        ),
    }

    info!("Server stopped");
    Ok(())
}
