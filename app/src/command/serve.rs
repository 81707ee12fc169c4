use std::path::PathBuf;

use finder_config::Config;
use finder_server::AppState;

use super::build_assistant;

/// Input parameters for the Serve command strategy.
///
/// Every `Some` overrides the matching config value.
#[derive(Debug, Clone)]
pub struct ServeInput {
    /// Explicit config file
    pub config: Option<PathBuf>,
    /// Bind address, defaults to `server.host`
    pub host: Option<String>,
    /// Bind port, defaults to `server.port`
    pub port: Option<u16>,
    /// Building CSV, defaults to `catalog.path`
    pub catalog: Option<PathBuf>,
}

/// Runs the HTTP chat server until Ctrl+C.
///
/// Startup order:
/// - Load configuration
/// - Resolve the API key and build the provider
/// - Load the catalog once, then serve `/`, `/chat` and `/chat/`
///
/// A missing key or catalog aborts before the port is bound.
#[derive(Debug, Clone, Copy)]
pub struct ServeStrategy;

impl super::CommandStrategy for ServeStrategy {
    type Input = ServeInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load(input.config.as_deref())?;
        let assistant = build_assistant(&config, input.catalog)?;

        let host = input.host.unwrap_or_else(|| config.server.host.clone());
        let port = input.port.unwrap_or(config.server.port);

        finder_server::serve(&host, port, AppState::new(assistant)).await?;
        Ok(())
    }
}
