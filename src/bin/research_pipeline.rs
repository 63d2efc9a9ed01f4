/// Kick off the research pipeline
///
/// RESEARCHER searches the web, WRITER summarises, EMAILER drafts the emails.
/// The model settings come from the YAML file named by `AGENTDECK_LLM_CONFIG`
/// and the pipeline is executed by the runner at `AGENTDECK_AGENT_RUNNER_URL`.

use agentdeck::{
    agents::{research_pipeline, AgentRunner, HttpAgentRunner, LlmConfig},
    config::Config,
};
use anyhow::Context;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_target(false).with_level(true).init();

    let config = Config::default();

    let llm = LlmConfig::load(&config.agents.llm_config_path)?;
    tracing::info!("🧠 Using model {} ({})", llm.model_name, llm.deployment_name);

    let pipeline = research_pipeline();
    pipeline.validate().context("research pipeline is inconsistent")?;

    let runner = HttpAgentRunner::new(config.agents.runner_url.clone());
    let outcome = runner.kick_off(&pipeline, &llm).await?;

    tracing::info!("✅ Pipeline finished on {}", runner.url());
    println!("{}", serde_json::to_string_pretty(&outcome)?);

    Ok(())
}
