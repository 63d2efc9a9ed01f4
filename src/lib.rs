/// agentdeck: registry service for agent pipeline building blocks
///
/// Keeps process-lifetime registries of components (LLMs, agents, tools) and
/// the workflows that reference them, served over a small JSON API, plus the
/// declarative description of agent pipelines handed to an external runner.

// Core configuration and setup
pub mod config;

// Component and workflow registries with optional SQLite persistence
pub mod registry;

// Agent pipeline descriptors, LLM configuration and the external runner seam
pub mod agents;

// HTTP API layer - REST endpoints over the registries
pub mod api;

// Server setup and initialization
pub mod server;

pub use agents::{AgentDescriptor, AgentPipeline, AgentRunner, LlmConfig};
pub use registry::{Component, ComponentRegistry, Workflow, WorkflowRegistry};
pub use server::{create_router, start_server};
