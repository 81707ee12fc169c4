use std::path::PathBuf;

use finder_config::Config;

use super::build_assistant;

/// Input parameters for the Ask command strategy.
#[derive(Debug, Clone)]
pub struct AskInput {
    pub config: Option<PathBuf>,
    /// The question, exactly as a chat client would send it
    pub message: String,
    pub catalog: Option<PathBuf>,
}

/// Sends one message through the full assistant and prints the reply.
///
/// Same pipeline as `POST /chat`, so upstream failures print the polite
/// failure text instead of returning an error.
#[derive(Debug, Clone, Copy)]
pub struct AskStrategy;

impl super::CommandStrategy for AskStrategy {
    type Input = AskInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load(input.config.as_deref())?;
        let assistant = build_assistant(&config, input.catalog)?;

        let reply = assistant.reply(&input.message).await;
        println!("{reply}");
        Ok(())
    }
}
