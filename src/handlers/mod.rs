//! HTTP request handlers

pub mod items;
pub mod root;

use sqlx::MySqlPool;
use std::sync::Arc;

use crate::config::Config;

/// Shared state handed to every handler
///
/// Constructed once at startup and passed through the router; handlers never
/// reach for process-global state.
#[derive(Clone)]
pub struct AppState {
    pub pool: MySqlPool,
    pub config: Arc<Config>,
}
