/// Agent descriptors handed to the external agent runner
///
/// These are plain data: what each agent is for, what it may use, and who
/// consumes its output. How the runner schedules them is not modelled here.

use serde::{Deserialize, Serialize};

/// Name of the terminal consumer: the output goes back to a human
pub const HUMAN_CONSUMER: &str = "HGI";

/// How an agent carries out its task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Executes tool-backed searches
    SearchExecutor,
    /// Runs its task through the language model
    LlmTaskExecutor,
}

/// Tools an agent may be granted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToolRef {
    #[serde(rename = "duckduckgo_search")]
    DuckDuckGoSearch,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentDescriptor {
    pub name: String,
    pub role: String,
    pub goal: String,
    pub backstory: String,
    pub capability: Capability,
    pub task: String,
    /// Agent that receives this agent's output, or [`HUMAN_CONSUMER`]
    pub output_consumer: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<ToolRef>,
}

impl AgentDescriptor {
    pub fn hands_off_to_human(&self) -> bool {
        self.output_consumer == HUMAN_CONSUMER
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn descriptor_uses_snake_case_wire_names() {
        let agent = AgentDescriptor {
            name: "RESEARCHER".to_string(),
            role: "RESEARCH EXPERT".to_string(),
            goal: "find things".to_string(),
            backstory: "searches a lot".to_string(),
            capability: Capability::SearchExecutor,
            task: "search".to_string(),
            output_consumer: "WRITER".to_string(),
            tools: vec![ToolRef::DuckDuckGoSearch],
        };

        let value = serde_json::to_value(&agent).unwrap();
        assert_eq!(value["capability"], json!("search_executor"));
        assert_eq!(value["tools"], json!(["duckduckgo_search"]));
        assert!(!agent.hands_off_to_human());
    }

    #[test]
    fn tools_default_to_empty() {
        let agent: AgentDescriptor = serde_json::from_value(json!({
            "name": "EMAILER",
            "role": "EMAIL CREATOR",
            "goal": "compose",
            "backstory": "precise",
            "capability": "llm_task_executor",
            "task": "write the email",
            "output_consumer": "HGI"
        }))
        .unwrap();

        assert!(agent.tools.is_empty());
        assert!(agent.hands_off_to_human());
    }
}
