use finder_config::Config;

/// Strategy for initializing the configuration.
///
/// Writes the template to `~/campus-finder/config.json` and refuses to
/// overwrite an existing file.
#[derive(Debug, Clone, Copy)]
pub struct InitStrategy;

impl super::CommandStrategy for InitStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        Config::create_config()?;
        Ok(())
    }
}
