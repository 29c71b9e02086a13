//! Poker room backend binary entrypoint wiring REST routes, MongoDB and the
//! background housekeeping loop.

use std::{env, net::SocketAddr, sync::Arc, time::Duration};

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;
use tokio::time::sleep;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod auth;
mod config;
mod dao;
mod dto;
mod error;
mod routes;
mod services;
mod state;

use config::AppConfig;
use dao::mongodb::{MongoConfig, MongoRoomStore};
use dao::storage::RoomStore;
use services::{bootstrap, housekeeping};
use state::{AppState, SharedState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let mongo_uri = env::var("MONGO_URI").unwrap_or_else(|_| "mongodb://localhost:27017".into());
    let mongo_db = env::var("MONGO_DB").ok();

    let app_state = AppState::new(AppConfig::load());

    tokio::spawn(run_store_supervisor(app_state.clone(), mongo_uri, mongo_db));
    tokio::spawn(housekeeping::run_housekeeping(app_state.clone()));
    // Build the HTTP router once the shared state is ready.
    let app = build_router(app_state);

    let port = env::var("PORT")
        .or_else(|_| env::var("SERVER_PORT"))
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8001);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(%addr, "starting server");

    let listener = TcpListener::bind(addr).await.context("binding server")?;
    let service = app.into_make_service();
    axum::serve(listener, service)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving axum")?;

    Ok(())
}

const SUPERVISOR_INITIAL_DELAY: Duration = Duration::from_secs(1);
const SUPERVISOR_MAX_DELAY: Duration = Duration::from_secs(10);
/// Seconds between health pings while the connection looks fine.
const SUPERVISOR_HEALTHY_INTERVAL: Duration = Duration::from_secs(5);

/// Keeps a MongoDB store installed in the shared state. While no store is
/// installed the API answers 503s; this loop reconnects with exponential
/// backoff, re-seeds missing defaults, and evicts a store whose pings fail.
async fn run_store_supervisor(state: SharedState, uri: String, db_name: Option<String>) {
    let mut delay = SUPERVISOR_INITIAL_DELAY;

    loop {
        if let Some(store) = state.store().await {
            if let Err(err) = store.health_check().await {
                warn!(error = %err, "MongoDB ping failed; entering degraded mode");
                state.clear_store().await;
                sleep(delay).await;
                delay = (delay * 2).min(SUPERVISOR_MAX_DELAY);
            } else {
                delay = SUPERVISOR_INITIAL_DELAY;
                sleep(SUPERVISOR_HEALTHY_INTERVAL).await;
            }
            continue;
        }

        match try_connect(&uri, db_name.as_deref()).await {
            Ok(store) => {
                info!("connected to MongoDB; leaving degraded mode");
                state.install_store(store).await;
                delay = SUPERVISOR_INITIAL_DELAY;
            }
            Err(err) => {
                error!(%err, "MongoDB connection attempt failed");
                sleep(delay).await;
                delay = (delay * 2).min(SUPERVISOR_MAX_DELAY);
            }
        }
    }
}

/// One full connection attempt: parse the URI, connect, ensure indexes and
/// seed defaults. Anything short of a ready-to-serve store is an error.
async fn try_connect(uri: &str, db_name: Option<&str>) -> anyhow::Result<Arc<dyn RoomStore>> {
    let config = MongoConfig::from_uri(uri, db_name)
        .await
        .context("parsing MongoDB configuration")?;
    let store: Arc<dyn RoomStore> = Arc::new(
        MongoRoomStore::connect(config)
            .await
            .context("connecting to MongoDB")?,
    );
    bootstrap::ensure_defaults(&store)
        .await
        .context("seeding defaults")?;
    Ok(store)
}

/// Build the top-level router and attach cross-cutting middleware layers.
fn build_router(state: SharedState) -> Router<()> {
    routes::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Configure tracing subscribers so logs include spans by default.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=debug".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Wait for Ctrl+C or SIGTERM and shut the server down gracefully.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut term = signal(SignalKind::terminate()).expect("install SIGTERM handler");
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {},
            _ = term.recv() => {},
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
