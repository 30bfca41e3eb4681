use std::sync::Arc;

use crate::config::Config;
use crate::store::FileStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<FileStore>,
    pub config: Config,
}
