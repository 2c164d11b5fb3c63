//! Environment-driven configuration.
//!
//! `DATABASE_PATH` is required; startup fails without it. Everything else
//! has a usable default or is optional.

use std::env;

use tracing::{info, warn};

use crate::error::{Error, Result};

const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the SQLite database file.
    pub database_path: String,
    /// Listen port for the HTTP server.
    pub port: u16,
    /// Base URL of the upstream auth gateway, when one is deployed.
    pub auth_gateway_url: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let database_path = env::var("DATABASE_PATH")
            .map_err(|_| Error::Config("DATABASE_PATH is not set".to_string()))?;

        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse()
                .map_err(|e| Error::Config(format!("invalid PORT value {raw:?}: {e}")))?,
            Err(_) => {
                info!("PORT not set, using default: {DEFAULT_PORT}");
                DEFAULT_PORT
            }
        };

        let auth_gateway_url = env::var("AUTH_GATEWAY_URL").ok();
        if auth_gateway_url.is_none() {
            warn!("AUTH_GATEWAY_URL not set; /auth routes will report a server error");
        }

        Ok(Self {
            database_path,
            port,
            auth_gateway_url,
        })
    }
}
