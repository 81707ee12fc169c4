use std::path::PathBuf;

use finder_config::Config;
use finder_core::{Language, Resolution, reply, resolve};
use tracing::debug;

use super::load_configured_catalog;

#[derive(Debug, Clone)]
pub struct LookupInput {
    pub config: Option<PathBuf>,
    pub query: String,
    pub catalog: Option<PathBuf>,
}

/// Resolves a query against the catalog only.
///
/// # Design
/// - No language model: the query goes straight to the matcher
/// - No API key needed, useful for checking a new CSV file
/// - Reply language follows the query, as in chat
#[derive(Debug, Clone, Copy)]
pub struct LookupStrategy;

impl super::CommandStrategy for LookupStrategy {
    type Input = LookupInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load(input.config.as_deref())?;
        let catalog = load_configured_catalog(&config, input.catalog.as_deref())?;

        let resolution = resolve(&input.query, &catalog);
        if let Resolution::Exact(record, tier) = &resolution {
            debug!("Matched {} by {}", record.code, tier.as_str());
        }

        println!(
            "{}",
            reply::render(&resolution, Language::detect(&input.query))
        );
        Ok(())
    }
}
