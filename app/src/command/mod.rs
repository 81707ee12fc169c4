//! Static strategy pattern for CLI commands.
//!
//! Each subcommand is its own strategy type with its own input type, so
//! `main` dispatches with a plain `match` and no trait objects. The shared
//! wiring (catalog, provider, assistant) lives in the helpers below.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use finder_catalog::load_catalog;
use finder_config::Config;
use finder_core::{Catalog, FinderAssistant, LLMProvider};
use finder_providers::{OpenAiProvider, RetryPolicy};
use tracing::info;

mod ask;
mod init;
mod lookup;
mod serve;
mod version;

pub use ask::{AskInput, AskStrategy};
pub use init::InitStrategy;
pub use lookup::{LookupInput, LookupStrategy};
pub use serve::{ServeInput, ServeStrategy};
pub use version::VersionStrategy;

/// Contract shared by every command strategy.
///
/// # Design
/// - Static dispatch: each strategy is a unit struct called directly
/// - Typed input: each strategy declares its own `Input`
pub trait CommandStrategy: Send + Sync + 'static {
    /// Parameters parsed from the command line.
    type Input;

    /// Run the command to completion.
    ///
    /// # Errors
    /// Returns an error if configuration, the catalog, or the command's own
    /// work fails. `main` reports it and exits non-zero.
    async fn execute(&self, input: Self::Input) -> anyhow::Result<()>;
}

/// Load the catalog, preferring a command-line override over the config.
fn load_configured_catalog(config: &Config, catalog: Option<&Path>) -> anyhow::Result<Catalog> {
    let path = catalog.unwrap_or(config.catalog.path.as_path());
    let catalog = load_catalog(path)?;
    info!("Catalog ready: {} buildings", catalog.len());
    Ok(catalog)
}

/// Provider, catalog and assistant wired from configuration.
///
/// Fails before anything is served when the API key or the catalog is missing.
fn build_assistant(config: &Config, catalog: Option<PathBuf>) -> anyhow::Result<FinderAssistant> {
    let openai = &config.providers.openai;
    let provider = OpenAiProvider::new(config.api_key()?, openai.timeout())?
        .with_base_url(openai.base_url.clone())
        .with_retry(RetryPolicy {
            base_delays: openai.retry_delays(),
            ..RetryPolicy::default()
        });

    let catalog = load_configured_catalog(config, catalog.as_deref())?;
    let assistant_config = config.assistant_config();
    info!(
        "Assistant model: {}, mode: {:?}",
        assistant_config.model, assistant_config.mode
    );

    let provider: Arc<dyn LLMProvider> = Arc::new(provider);
    Ok(FinderAssistant::new(provider, catalog, assistant_config))
}
