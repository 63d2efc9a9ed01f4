/// Agent pipeline layer
///
/// Describes multi-agent pipelines declaratively and hands them to an external
/// runner. Scheduling and execution of the agents belong to that runner.

pub mod types;

pub mod pipeline;

// YAML-configured language model settings
pub mod llm;

// External runner seam and its HTTP binding
pub mod runner;

pub use llm::LlmConfig;
pub use pipeline::{research_pipeline, AgentPipeline, PipelineError};
pub use runner::{AgentRunner, HttpAgentRunner, KickoffOutcome};
pub use types::{AgentDescriptor, Capability, ToolRef, HUMAN_CONSUMER};
