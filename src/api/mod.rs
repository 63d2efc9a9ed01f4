/// HTTP API Layer
///
/// REST endpoints over the component and workflow registries:
/// - Component create/list/configure/delete
/// - Workflow create/list
/// - Uniform JSON error bodies

use crate::registry::{ComponentRegistry, WorkflowRegistry};
use serde::Serialize;
use std::sync::Arc;

pub mod error;

// Component endpoints (POST/GET/PUT/DELETE)
pub mod components;

// Workflow endpoints (POST/GET)
pub mod workflows;

pub use components::create_component_routes;
pub use error::ApiError;
pub use workflows::create_workflow_routes;

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub components: Arc<ComponentRegistry>,
    pub workflows: Arc<WorkflowRegistry>,
}

impl AppState {
    /// Memory-only state, used when no database is configured
    pub fn in_memory() -> Self {
        Self {
            components: Arc::new(ComponentRegistry::new()),
            workflows: Arc::new(WorkflowRegistry::new()),
        }
    }

    /// Drop all in-memory records (called on shutdown)
    pub async fn clear(&self) {
        self.components.clear().await;
        self.workflows.clear().await;
    }
}

/// Response for create operations
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: u64,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}
