/// Component registry REST endpoints
///
/// `{id}` in the path is the component's zero-based position in insertion
/// order. Deleting a component moves every later component up one position.

use crate::{
    api::{error::ApiError, AppState, CreatedResponse, MessageResponse},
    registry::{Component, ComponentPatch, Stored},
};
use axum::{
    extract::{rejection::{JsonRejection, PathRejection}, Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, put},
    Router,
};

pub fn create_component_routes() -> Router<AppState> {
    Router::new()
        .route("/components", get(list_components).post(create_component))
        .route("/components/{id}", put(configure_component).delete(delete_component))
}

/// Register a new component
///
/// POST /components
/// Body: { "type": "LLM", "configuration": { ... } }
async fn create_component(
    State(state): State<AppState>,
    payload: Result<Json<Component>, JsonRejection>,
) -> Result<Json<CreatedResponse>, ApiError> {
    let Json(component) = payload?;
    let kind = component.kind.clone();

    let id = state.components.insert(component).await?;
    tracing::info!("➕ Added {} component {}", kind, id);

    Ok(Json(CreatedResponse {
        id,
        message: "Component added successfully".to_string(),
    }))
}

/// GET /components
async fn list_components(State(state): State<AppState>) -> Json<Vec<Stored<Component>>> {
    Json(state.components.list())
}

/// Merge new configuration keys into a component
///
/// PUT /components/{id}
/// Body: { "configuration": { ... } } (a "type" field is accepted and ignored)
async fn configure_component(
    State(state): State<AppState>,
    position: Result<Path<String>, PathRejection>,
    payload: Result<Json<ComponentPatch>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(position) = position?;
    let Json(patch) = payload?;
    let position = component_position(&position)?;

    let id = state.components.configure(position, patch).await?;
    tracing::info!("🔧 Configured component {} at position {}", id, position);

    Ok(Json(MessageResponse::new("Component configuration updated")))
}

/// DELETE /components/{id}
async fn delete_component(
    State(state): State<AppState>,
    position: Result<Path<String>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(position) = position?;
    let position = component_position(&position)?;

    let removed = state.components.remove_at(position).await?;
    tracing::info!("🗑️ Deleted component {} from position {}", removed.id, position);

    Ok(Json(MessageResponse::new("Component deleted successfully")))
}

/// Parse a position segment
///
/// Anything that is not an integer literal is a bad request. Integer literals
/// that can never index the registry (negative, or too large for `usize`) are
/// not-found, the same as any other out-of-range position.
fn component_position(raw: &str) -> Result<usize, ApiError> {
    let (negative, digits) = match raw.strip_prefix('-') {
        Some(digits) => (true, digits),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ApiError::Validation {
            status: StatusCode::BAD_REQUEST,
            message: format!("Invalid component position `{}`", raw),
        });
    }

    if negative && digits.bytes().any(|b| b != b'0') {
        return Err(ApiError::not_found("Component not found"));
    }

    digits
        .parse::<usize>()
        .map_err(|_| ApiError::not_found("Component not found"))
}
