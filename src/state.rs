use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::Connection;

use crate::auth::AuthGateway;
use crate::config::Config;
use crate::error::{Error, Result};

/// Shared per-process state: configuration, the storage handle, and the
/// auth gateway when one is configured.
///
/// SQLite is a single-writer store and request volumes here are tiny, so
/// the connection sits behind a mutex rather than a pool.
pub struct AppState {
    pub config: Config,
    db: Mutex<Connection>,
    pub auth: Option<Arc<dyn AuthGateway>>,
}

impl AppState {
    pub fn new(
        config: Config,
        conn: Connection,
        auth: Option<Arc<dyn AuthGateway>>,
    ) -> Arc<Self> {
        Arc::new(Self {
            config,
            db: Mutex::new(conn),
            auth,
        })
    }

    pub fn db(&self) -> Result<MutexGuard<'_, Connection>> {
        self.db
            .lock()
            .map_err(|_| Error::internal("database handle poisoned"))
    }
}
