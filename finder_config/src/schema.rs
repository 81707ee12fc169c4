use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

use finder_core::{AssistantConfig, AssistantMode, assistant::DEFAULT_SYSTEM_PROMPT};

/// Environment variable holding the language-model API key.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Dotenv file consulted when the variable is not exported.
const ENV_FILE: &str = ".env";

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub assistant: AssistantSettings,
    #[serde(default)]
    pub providers: ProvidersConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CatalogConfig {
    #[serde(default = "CatalogConfig::default_path")]
    pub path: PathBuf,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: Self::default_path(),
        }
    }
}

impl CatalogConfig {
    fn default_path() -> PathBuf {
        PathBuf::from("Building_information_data.csv")
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "ServerConfig::default_host")]
    pub host: String,
    #[serde(default = "ServerConfig::default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
        }
    }
}

impl ServerConfig {
    fn default_host() -> String {
        "0.0.0.0".to_string()
    }

    const fn default_port() -> u16 {
        8000
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AssistantSettings {
    #[serde(default = "AssistantSettings::default_model")]
    pub model: String,
    #[serde(default)]
    pub mode: AssistantMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
}

impl Default for AssistantSettings {
    fn default() -> Self {
        Self {
            model: Self::default_model(),
            mode: AssistantMode::default(),
            system_prompt: None,
        }
    }
}

impl AssistantSettings {
    fn default_model() -> String {
        "gpt-4.1-mini".to_string()
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub openai: ProviderConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProviderConfig {
    /// Fallback when the environment variable is unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default = "ProviderConfig::default_base_url")]
    pub base_url: String,
    #[serde(default = "ProviderConfig::default_timeout_secs")]
    pub timeout_secs: u64,
    /// Waits between retries; empty means a single attempt.
    #[serde(default)]
    pub retry_delays_secs: Vec<u64>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: Self::default_base_url(),
            timeout_secs: Self::default_timeout_secs(),
            retry_delays_secs: Vec::new(),
        }
    }
}

impl ProviderConfig {
    fn default_base_url() -> String {
        "https://api.openai.com/v1".to_string()
    }

    const fn default_timeout_secs() -> u64 {
        30
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    #[must_use]
    pub fn retry_delays(&self) -> Vec<Duration> {
        self.retry_delays_secs
            .iter()
            .copied()
            .map(Duration::from_secs)
            .collect()
    }
}

impl Config {
    /// `~/campus-finder`
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        Ok(dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join("campus-finder"))
    }

    pub fn default_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Load from `path`, or from the default location.
    ///
    /// An explicit path must exist. A missing default file yields the built-in
    /// defaults so the service runs with environment configuration alone.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(path) = path {
            if !path.exists() {
                anyhow::bail!("Config file not found at: {}", path.display());
            }
            return Self::read(path);
        }

        let default_path = Self::default_path()?;
        if default_path.exists() {
            Self::read(&default_path)
        } else {
            info!(
                "No config file at {}, using defaults",
                default_path.display()
            );
            Ok(Self::default())
        }
    }

    fn read(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_json(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config {}: {e}", path.display()))?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// API key for the language-model service.
    ///
    /// Lookup order: the process environment, then `.env` in the working
    /// directory, then the config file. None being set is fatal for anything
    /// that talks to the model.
    pub fn api_key(&self) -> anyhow::Result<String> {
        let from_env = std::env::var(API_KEY_ENV)
            .ok()
            .or_else(|| env_file_value(Path::new(ENV_FILE), API_KEY_ENV));
        self.resolve_api_key(from_env)
    }

    fn resolve_api_key(&self, from_env: Option<String>) -> anyhow::Result<String> {
        from_env
            .filter(|key| !key.trim().is_empty())
            .or_else(|| {
                self.providers
                    .openai
                    .api_key
                    .clone()
                    .filter(|key| !key.trim().is_empty())
            })
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "{API_KEY_ENV} is not set. Export it or add providers.openai.api_key to the config file."
                )
            })
    }

    #[must_use]
    pub fn assistant_config(&self) -> AssistantConfig {
        AssistantConfig {
            model: self.assistant.model.clone(),
            mode: self.assistant.mode,
            system_prompt: self
                .assistant
                .system_prompt
                .clone()
                .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string()),
        }
    }

    pub fn ensure_config_dir() -> anyhow::Result<PathBuf> {
        let config_dir = Self::config_dir()?;
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    pub fn create_config() -> anyhow::Result<PathBuf> {
        let config_dir = Self::ensure_config_dir()?;
        let config_path = config_dir.join("config.json");
        Self::write_template(&config_path)?;

        println!("✅ Created config file at: {}", config_path.display());
        println!();
        println!("📝 Next steps:");
        println!("   1. Export {API_KEY_ENV} with your API key");
        println!("   2. Point catalog.path at the building CSV file");
        println!("   3. Run 'campus-finder serve' to start the HTTP server");
        println!();
        println!("🔧 Configuration options:");
        println!("   - assistant.mode: extract (default) or tool");
        println!("   - providers.openai.base_url: any OpenAI-compatible endpoint");
        println!("   - providers.openai.retry_delays_secs: e.g. [2, 4] to retry twice");
        println!();
        Ok(config_path)
    }

    fn write_template(config_path: &Path) -> anyhow::Result<()> {
        if config_path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                config_path.display()
            );
        }

        let config_template = r#"{
  "catalog": {
    "path": "Building_information_data.csv"
  },
  "server": {
    "host": "0.0.0.0",
    "port": 8000
  },
  "assistant": {
    "model": "gpt-4.1-mini",
    "mode": "extract"
  },
  "providers": {
    "openai": {
      "base_url": "https://api.openai.com/v1",
      "timeout_secs": 30,
      "retry_delays_secs": []
    }
  }
}"#;

        std::fs::write(config_path, config_template)?;
        Ok(())
    }
}

/// Value of `key` in a dotenv file, without touching the process environment.
fn env_file_value(path: &Path, key: &str) -> Option<String> {
    let entries = dotenvy::from_path_iter(path).ok()?;
    let value = entries
        .filter_map(Result::ok)
        .find(|(name, _)| name == key)
        .map(|(_, value)| value)?;
    debug!("Read {key} from {}", path.display());
    Some(value)
}
