use async_trait::async_trait;

mod find_building;
mod registry;

pub use find_building::FindBuildingTool;
pub use registry::ToolRegistry;

/// A function the model may call during a chat completion.
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    /// JSON schema of the arguments object.
    fn parameters(&self) -> serde_json::Value;
    async fn execute(&self, args: serde_json::Value) -> anyhow::Result<String>;
}
