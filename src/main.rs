/// agentdeck: component and workflow registry service
///
/// Loads configuration from the environment and serves:
/// - Component API at /components and /components/{id}
/// - Workflow API at /workflows
/// - Health check at /healthz

use agentdeck::{config::Config, server::start_server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to 0.0.0.0:3004 with memory-only registries
    let config = Config::default();

    start_server(config).await
}
