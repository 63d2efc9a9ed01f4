/// External agent runner seam
///
/// Kicking off a pipeline is one call to a collaborator that owns all agent
/// scheduling and execution. [`HttpAgentRunner`] is the production binding: it
/// posts the pipeline and model settings to a runner service and returns
/// whatever the runner reports.

use crate::agents::{
    llm::LlmConfig,
    pipeline::AgentPipeline,
    types::AgentDescriptor,
};
use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::future::Future;

/// Result reported by the runner, passed through untouched
pub type KickoffOutcome = Value;

pub trait AgentRunner {
    fn kick_off(
        &self,
        pipeline: &AgentPipeline,
        llm: &LlmConfig,
    ) -> impl Future<Output = Result<KickoffOutcome>> + Send;
}

/// Wire body sent to the runner service
#[derive(Debug, Serialize)]
pub struct KickoffRequest<'a> {
    pub agents: &'a [AgentDescriptor],
    pub entrypoints: &'a [String],
    pub llm: &'a LlmConfig,
}

#[derive(Debug, Clone)]
pub struct HttpAgentRunner {
    client: reqwest::Client,
    url: String,
}

impl HttpAgentRunner {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl AgentRunner for HttpAgentRunner {
    async fn kick_off(&self, pipeline: &AgentPipeline, llm: &LlmConfig) -> Result<KickoffOutcome> {
        let request = KickoffRequest {
            agents: &pipeline.agents,
            entrypoints: &pipeline.entrypoints,
            llm,
        };

        tracing::info!(
            "🚀 Kicking off {} agents ({} entrypoints) at {}",
            pipeline.agents.len(),
            pipeline.entrypoints.len(),
            self.url
        );

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .with_context(|| format!("agent runner at {} is unreachable", self.url))?
            .error_for_status()
            .context("agent runner rejected the pipeline")?;

        response
            .json::<KickoffOutcome>()
            .await
            .context("agent runner returned invalid JSON")
    }
}
