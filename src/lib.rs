//! rollcalld: a school attendance backend.
//!
//! REST API over a SQLite store: roster management, daily per-class
//! attendance marking with day-scoped upserts, and per-student attendance
//! summaries. Auth is delegated to an external gateway.

pub mod auth;
pub mod config;
pub mod db;
pub mod directory;
pub mod error;
pub mod http;
pub mod ledger;
pub mod state;

use std::path::Path;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use crate::auth::{AuthGateway, HttpAuthGateway};
use crate::error::Result;

/// Load configuration, open the store, and serve until shutdown.
pub async fn run() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = config::Config::load()?;
    let conn = db::open_db(Path::new(&config.database_path))?;
    let gateway = config
        .auth_gateway_url
        .clone()
        .map(|url| Arc::new(HttpAuthGateway::new(url)) as Arc<dyn AuthGateway>);

    let address = format!("0.0.0.0:{}", config.port);
    let state = state::AppState::new(config, conn, gateway);
    let app = http::router(state);

    let listener = TcpListener::bind(&address).await?;
    info!("listening on {address}");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if signal::ctrl_c().await.is_ok() {
            info!("received Ctrl+C, shutting down");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
                info!("received terminate signal, shutting down");
            }
            Err(_) => std::future::pending().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
