//! Route handlers for the item API.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::store::{Item, NewItem};

pub async fn root() -> Json<serde_json::Value> {
    Json(json!({ "message": "Backend API is running" }))
}

/// Liveness probe; answers regardless of store state.
pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// `GET /items`: all items, newest first.
pub async fn list_items(State(state): State<AppState>) -> Result<Json<Vec<Item>>, ApiError> {
    let items = state.store.list().await.map_err(|e| {
        tracing::error!(error = %e, "Error fetching items");
        ApiError::from(e)
    })?;
    Ok(Json(items))
}

#[derive(Debug, Deserialize)]
pub struct CreateItem {
    name: String,
}

/// `POST /items`: create an item from a JSON body with a non-empty `name`.
pub async fn create_item(
    State(state): State<AppState>,
    payload: Result<Json<CreateItem>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(body) = payload.map_err(|rejection| ApiError::Validation(rejection.body_text()))?;

    let name = body.name.trim();
    if name.is_empty() {
        return Err(ApiError::Validation("name is required".to_string()));
    }

    let item = state
        .store
        .insert(NewItem {
            name: name.to_string(),
        })
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Error creating item");
            ApiError::from(e)
        })?;

    state.telemetry.record_item_created();
    tracing::info!(id = %item.id, "New item created: {}", item.name);

    Ok((StatusCode::CREATED, Json(item)).into_response())
}

/// `GET /metrics`: text exposition of every registered metric.
pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.telemetry.render(),
    )
}
