use axum::{extract::State, http::StatusCode, Json};

use super::AppState;
use crate::db;
use crate::error::AppError;
use crate::models::item::{Item, NewItem};

/// `POST /items/`
///
/// Validates the payload, persists it, and returns the created row including
/// the server-assigned `id` and `created_at`.
pub async fn create_item(
    State(state): State<AppState>,
    Json(payload): Json<NewItem>,
) -> Result<(StatusCode, Json<Item>), AppError> {
    tracing::info!(name = %payload.name, "Create item request received");

    payload.validate()?;

    let item = db::insert_item(&state.pool, &payload).await?;
    tracing::info!(id = item.id, "Item created");

    Ok((StatusCode::CREATED, Json(item)))
}
