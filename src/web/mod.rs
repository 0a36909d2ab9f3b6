//! HTTP interface: HTML pages over the note service.

pub mod error;
pub mod handlers;
pub mod pages;
pub mod paths;
pub mod routes;
pub mod session;

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::ServerConfig;
use crate::service::NoteService;
use crate::storage::SqliteStore;

pub use error::AppError;
pub use routes::create_router;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub notes: NoteService,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(store: SqliteStore, config: ServerConfig) -> Self {
        Self {
            notes: NoteService::new(Arc::new(Mutex::new(store))),
            config: Arc::new(config),
        }
    }
}
