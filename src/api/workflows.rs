/// Workflow registry REST endpoints
///
/// Workflows can only be created and listed. Component references are stored
/// as given and never checked against the component registry.

use crate::{
    api::{error::ApiError, AppState, CreatedResponse},
    registry::{Stored, Workflow},
};
use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
    routing::get,
    Router,
};

pub fn create_workflow_routes() -> Router<AppState> {
    Router::new().route("/workflows", get(list_workflows).post(create_workflow))
}

/// Register a new workflow
///
/// POST /workflows
/// Body: { "component_ids": [0, 1], "execution_order": [1, 0] }
async fn create_workflow(
    State(state): State<AppState>,
    payload: Result<Json<Workflow>, JsonRejection>,
) -> Result<Json<CreatedResponse>, ApiError> {
    let Json(workflow) = payload?;
    let steps = workflow.component_ids.len();

    let id = state.workflows.insert(workflow).await?;
    tracing::info!("➕ Added workflow {} with {} components", id, steps);

    Ok(Json(CreatedResponse {
        id,
        message: "Workflow added successfully".to_string(),
    }))
}

/// GET /workflows
async fn list_workflows(State(state): State<AppState>) -> Json<Vec<Stored<Workflow>>> {
    Json(state.workflows.list())
}
