use std::sync::Arc;

use axum::extract::FromRef;
use storage::Database;

use crate::config::Config;
use crate::email::EmailSender;

/// Shared handler state. Handlers that only need the database keep
/// extracting `State<Database>`.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub config: Arc<Config>,
    pub mailer: Arc<dyn EmailSender>,
}

impl AppState {
    pub fn new(db: Database, config: Config, mailer: Arc<dyn EmailSender>) -> Self {
        Self {
            db,
            config: Arc::new(config),
            mailer,
        }
    }
}

impl FromRef<AppState> for Database {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}

impl FromRef<AppState> for Arc<Config> {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
