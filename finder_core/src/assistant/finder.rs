//! Chat pipeline: extract a building identifier with the model, look it up
//! locally, render the reply.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::matcher::{Resolution, find_category, resolve};
use crate::reply::{self, Language};
use crate::tools::{FindBuildingTool, ToolRegistry};
use crate::{Catalog, ChatMessage, LLMProvider};

/// Fixed instruction for the extraction call.
pub const EXTRACTION_PROMPT: &str = "Extract only the building identifier from the user's message: a building code, \
building name (Korean or English), nickname, or a building category such as library. \
Reply with the identifier alone, without explanation, quotes or punctuation. \
If the message does not mention any building, reply with NONE.";

/// System prompt for the tool-calling mode.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are KU Campus Building Finder, a multilingual assistant for Korea University (Seoul).

- Users can speak in Korean, English, or any other language.
- When they ask where a building is, what its code or name is, or how to find it, \
call the `find_building` tool with a query string (building code, nickname, or English/Korean name).
- Do not make up building information. Always rely on tool results.

If no building is found, answer in English:
\"The code you entered was not recognized. Please try again.\"

If a building is found, reply in this format (in English, but keep the Korean name as is):

Here is the information.
Code: <code>
Building name(KOREAN): <name_kr>
Building name(ENGLISH): <name_en>
Map link(Naver map): <map_link>";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssistantMode {
    /// One model call extracts the identifier; matching and formatting are local.
    #[default]
    Extract,
    /// The model drives the lookup through the `find_building` tool.
    Tool,
}

#[derive(Debug, Clone)]
pub struct AssistantConfig {
    pub model: String,
    pub mode: AssistantMode,
    pub system_prompt: String,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4.1-mini".to_string(),
            mode: AssistantMode::Extract,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("language model request failed: {0}")]
    Upstream(anyhow::Error),

    #[error("malformed tool call: {0}")]
    MalformedToolCall(String),
}

/// Strip the decoration models like to add around a bare identifier.
///
/// Returns `None` for empty output and for the `NONE` sentinel.
#[must_use]
pub fn clean_identifier(raw: &str) -> Option<String> {
    let first_line = raw.trim().lines().next().unwrap_or_default();
    let cleaned = first_line
        .trim()
        .trim_matches(|c: char| matches!(c, '"' | '\'' | '`' | '.' | '“' | '”'))
        .trim();

    if cleaned.is_empty() || cleaned.eq_ignore_ascii_case("none") {
        None
    } else {
        Some(cleaned.to_string())
    }
}

pub struct FinderAssistant<P = Arc<dyn LLMProvider>>
where
    P: Send + Sync,
{
    provider: P,
    catalog: Catalog,
    config: AssistantConfig,
    tools: ToolRegistry,
}

impl<P> FinderAssistant<P>
where
    P: LLMProvider + Send + Sync,
{
    #[must_use]
    pub fn new(provider: P, catalog: Catalog, config: AssistantConfig) -> Self {
        let mut tools = ToolRegistry::new();
        tools.register(Arc::new(FindBuildingTool::new(catalog.clone())));

        Self {
            provider,
            catalog,
            config,
            tools,
        }
    }

    /// Answer one user message. Failures become polite reply text.
    pub async fn reply(&self, message: &str) -> String {
        let message = message.trim();
        let lang = Language::detect(message);

        if message.is_empty() {
            return reply::not_found(lang).to_string();
        }

        let result = match self.config.mode {
            AssistantMode::Extract => self.reply_by_extraction(message, lang).await,
            AssistantMode::Tool => self.reply_with_tools(message, lang).await,
        };

        result.unwrap_or_else(|e| {
            warn!("Failed to answer message: {e}");
            reply::upstream_failure(lang).to_string()
        })
    }

    /// Ask the model for the building identifier named in `message`.
    pub async fn extract_identifier(&self, message: &str) -> Result<Option<String>, AssistantError> {
        let messages = [ChatMessage::system(EXTRACTION_PROMPT), ChatMessage::user(message)];

        let response = self
            .provider
            .chat(&messages, &self.config.model)
            .await
            .map_err(AssistantError::Upstream)?;

        if let Some(usage) = &response.usage {
            debug!(
                "Extraction usage: prompt={} completion={} total={}",
                usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
            );
        }

        Ok(clean_identifier(&response.content))
    }

    async fn reply_by_extraction(
        &self,
        message: &str,
        lang: Language,
    ) -> Result<String, AssistantError> {
        let identifier = self.extract_identifier(message).await?;
        let records = self.catalog.records();

        let mut resolution = identifier
            .as_deref()
            .map_or(Resolution::NoMatch, |id| resolve(id, records));

        // The model may have dropped the category word; try the raw message too.
        if resolution == Resolution::NoMatch {
            let candidates = find_category(message, records);
            if !candidates.is_empty() {
                resolution = Resolution::Category(candidates);
            }
        }

        match &resolution {
            Resolution::Exact(record, tier) => info!(
                "Identifier {:?} matched building {} by {}",
                identifier,
                record.code,
                tier.as_str()
            ),
            Resolution::Category(records) => info!(
                "Identifier {:?} matched {} buildings by category",
                identifier,
                records.len()
            ),
            Resolution::NoMatch => info!("Identifier {:?} matched nothing", identifier),
        }

        Ok(reply::render(&resolution, lang))
    }

    async fn reply_with_tools(&self, message: &str, lang: Language) -> Result<String, AssistantError> {
        let definitions = self.tools.get_definitions();
        let mut messages = vec![
            ChatMessage::system(self.config.system_prompt.clone()),
            ChatMessage::user(message),
        ];

        let first = self
            .provider
            .chat_with_tools(&messages, &definitions, &self.config.model)
            .await
            .map_err(AssistantError::Upstream)?;

        // Only the first tool call is honoured.
        let Some(call) = first.tool_calls.first().cloned() else {
            info!("Model answered without calling a tool");
            if first.content.trim().is_empty() {
                return Ok(reply::not_found(lang).to_string());
            }
            return Ok(first.content);
        };

        let args: serde_json::Value = serde_json::from_str(&call.arguments)
            .map_err(|e| AssistantError::MalformedToolCall(format!("{}: {e}", call.name)))?;

        let tool_output = match self.tools.execute(&call.name, args).await {
            Ok(output) => output,
            Err(e) => {
                warn!("Tool {} failed: {e}", call.name);
                serde_json::json!({ "error": e.to_string() }).to_string()
            }
        };

        messages.push(ChatMessage::assistant_tool_calls(
            first.content,
            first.tool_calls,
        ));
        messages.push(ChatMessage::tool_result(call.id, tool_output));

        let second = self
            .provider
            .chat(&messages, &self.config.model)
            .await
            .map_err(AssistantError::Upstream)?;

        if second.content.trim().is_empty() {
            return Ok(reply::not_found(lang).to_string());
        }
        Ok(second.content)
    }
}
