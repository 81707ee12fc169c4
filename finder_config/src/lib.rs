mod schema;

pub use schema::{
    API_KEY_ENV, AssistantSettings, CatalogConfig, Config, ProviderConfig, ProvidersConfig,
    ServerConfig,
};
