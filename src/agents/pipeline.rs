/// Declarative agent pipelines
///
/// A pipeline is the full agent list plus the agents that receive the initial
/// input. Validation only checks that names line up; cycles and ordering are
/// the runner's business.

use crate::agents::types::{AgentDescriptor, Capability, ToolRef, HUMAN_CONSUMER};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PipelineError {
    #[error("pipeline has no agents")]
    Empty,

    #[error("pipeline has no entrypoints")]
    NoEntrypoints,

    #[error("agent '{0}' is defined more than once")]
    DuplicateAgent(String),

    #[error("entrypoint '{0}' is not an agent in this pipeline")]
    UnknownEntrypoint(String),

    #[error("agent '{agent}' hands off to unknown consumer '{consumer}'")]
    UnknownConsumer { agent: String, consumer: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentPipeline {
    pub agents: Vec<AgentDescriptor>,
    /// Names of the agents that start the pipeline
    pub entrypoints: Vec<String>,
}

impl AgentPipeline {
    /// Pipeline whose first agent is the only entrypoint
    pub fn starting_with_first(agents: Vec<AgentDescriptor>) -> Self {
        let entrypoints = agents.first().map(|agent| vec![agent.name.clone()]).unwrap_or_default();
        Self { agents, entrypoints }
    }

    pub fn agent(&self, name: &str) -> Option<&AgentDescriptor> {
        self.agents.iter().find(|agent| agent.name == name)
    }

    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.agents.is_empty() {
            return Err(PipelineError::Empty);
        }
        if self.entrypoints.is_empty() {
            return Err(PipelineError::NoEntrypoints);
        }

        let mut names = HashSet::new();
        for agent in &self.agents {
            if !names.insert(agent.name.as_str()) {
                return Err(PipelineError::DuplicateAgent(agent.name.clone()));
            }
        }

        if let Some(entry) = self.entrypoints.iter().find(|entry| !names.contains(entry.as_str())) {
            return Err(PipelineError::UnknownEntrypoint(entry.clone()));
        }

        for agent in &self.agents {
            let consumer = agent.output_consumer.as_str();
            if consumer != HUMAN_CONSUMER && !names.contains(consumer) {
                return Err(PipelineError::UnknownConsumer {
                    agent: agent.name.clone(),
                    consumer: agent.output_consumer.clone(),
                });
            }
        }

        Ok(())
    }
}

/// RESEARCHER -> WRITER -> EMAILER, ending with a human reader
///
/// The researcher searches the web for recent COVID-19 and cancer treatment
/// trends, the writer summarises them and the emailer turns the summary into
/// emails for doctors and the general public.
pub fn research_pipeline() -> AgentPipeline {
    let agents = vec![
        AgentDescriptor {
            name: "RESEARCHER".to_string(),
            role: "RESEARCH EXPERT".to_string(),
            goal: "search for latest trends in COVID-19 and Cancer treatment that includes medicines, physical exercises, overall management and prevention aspects".to_string(),
            backstory: "Has the capability to execute internet search tool".to_string(),
            capability: Capability::SearchExecutor,
            task: "search internet for the goal for the trends after first half of 2023".to_string(),
            output_consumer: "WRITER".to_string(),
            tools: vec![ToolRef::DuckDuckGoSearch],
        },
        AgentDescriptor {
            name: "WRITER".to_string(),
            role: "SUMMARISING EXPERT".to_string(),
            goal: "summarize input into presentable points".to_string(),
            backstory: "Expert in summarising the given text".to_string(),
            capability: Capability::LlmTaskExecutor,
            task: "summarize points to present to health care professionals and general public separately".to_string(),
            output_consumer: "EMAILER".to_string(),
            tools: Vec::new(),
        },
        AgentDescriptor {
            name: "EMAILER".to_string(),
            role: "EMAIL CREATOR".to_string(),
            goal: "composes the email based on the content".to_string(),
            backstory: "Good in composing precise emails".to_string(),
            capability: Capability::LlmTaskExecutor,
            task: "composes email based on summary to doctors and general public separately into a file with subject-summary and details".to_string(),
            output_consumer: HUMAN_CONSUMER.to_string(),
            tools: Vec::new(),
        },
    ];

    AgentPipeline::starting_with_first(agents)
}
