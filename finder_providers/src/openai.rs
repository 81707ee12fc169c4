use async_trait::async_trait;
use finder_core::{ChatMessage, LLMProvider, LLMResponse, ToolCall, Usage};
use reqwest::Client;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::info;

use crate::retry::retry_with_backoff;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// How failed completion requests are retried.
///
/// The default is a single attempt with no retry.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub base_delays: Vec<Duration>,
    pub final_retries: usize,
    pub final_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            base_delays: Vec::new(),
            final_retries: 0,
            final_delay: Duration::from_secs(10),
        }
    }
}

/// Client for OpenAI-compatible `/chat/completions` endpoints.
#[derive(Clone)]
pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    base_url: String,
    retry: RetryPolicy,
}

impl OpenAiProvider {
    /// Every request is bounded by `timeout`.
    pub fn new(api_key: String, timeout: Duration) -> anyhow::Result<Self> {
        info!("Creating OpenAiProvider (timeout {}s)", timeout.as_secs());
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            retry: RetryPolicy::default(),
        })
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Helper method to send a single request
    async fn try_send(&self, request: &Value) -> anyhow::Result<LLMResponse> {
        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await?;

        parse_completion(&response)
    }

    async fn send(&self, request: &Value) -> anyhow::Result<LLMResponse> {
        retry_with_backoff(
            || self.try_send(request),
            &self.retry.base_delays,
            self.retry.final_retries,
            self.retry.final_delay,
        )
        .await
    }
}

/// Chat-completions wire form of a message.
fn wire_message(message: &ChatMessage) -> Value {
    let mut value = json!({
        "role": message.role,
        "content": message.content,
    });

    if !message.tool_calls.is_empty() {
        value["tool_calls"] = message
            .tool_calls
            .iter()
            .map(|call| {
                json!({
                    "id": call.id,
                    "type": "function",
                    "function": {
                        "name": call.name,
                        "arguments": call.arguments,
                    }
                })
            })
            .collect();
    }

    if let Some(id) = &message.tool_call_id {
        value["tool_call_id"] = json!(id);
    }

    value
}

fn token_count(usage: &serde_json::Map<String, Value>, key: &str) -> u32 {
    u32::try_from(usage.get(key).and_then(Value::as_u64).unwrap_or(0)).unwrap_or(0)
}

fn parse_completion(response: &Value) -> anyhow::Result<LLMResponse> {
    let message = &response["choices"][0]["message"];
    if message.is_null() {
        anyhow::bail!("Invalid response format: missing choices[0].message");
    }

    let tool_calls = message["tool_calls"]
        .as_array()
        .map(|calls| {
            calls
                .iter()
                .map(|call| -> anyhow::Result<ToolCall> {
                    Ok(ToolCall {
                        id: call["id"].as_str().unwrap_or_default().to_string(),
                        name: call["function"]["name"]
                            .as_str()
                            .ok_or_else(|| anyhow::anyhow!("Invalid tool call: missing name"))?
                            .to_string(),
                        arguments: call["function"]["arguments"]
                            .as_str()
                            .unwrap_or("{}")
                            .to_string(),
                    })
                })
                .collect::<anyhow::Result<Vec<ToolCall>>>()
        })
        .transpose()?
        .unwrap_or_default();

    let content = match message["content"].as_str() {
        Some(content) => content.to_string(),
        None if !tool_calls.is_empty() => String::new(),
        None => anyhow::bail!("Invalid response format: missing content"),
    };

    let usage = response["usage"].as_object().map(|u| Usage {
        prompt_tokens: token_count(u, "prompt_tokens"),
        completion_tokens: token_count(u, "completion_tokens"),
        total_tokens: token_count(u, "total_tokens"),
    });

    Ok(LLMResponse {
        content,
        tool_calls,
        usage,
    })
}

#[async_trait]
impl LLMProvider for OpenAiProvider {
    async fn chat(&self, messages: &[ChatMessage], model: &str) -> anyhow::Result<LLMResponse> {
        let request = json!({
            "model": model,
            "messages": messages.iter().map(wire_message).collect::<Vec<_>>(),
        });

        info!("Sending request to chat completions API: model={}", model);
        let response = self.send(&request).await?;
        info!("Received response from chat completions API");
        Ok(response)
    }

    async fn chat_with_tools(
        &self,
        messages: &[ChatMessage],
        tools: &[Value],
        model: &str,
    ) -> anyhow::Result<LLMResponse> {
        let request = json!({
            "model": model,
            "messages": messages.iter().map(wire_message).collect::<Vec<_>>(),
            "tools": tools,
            "tool_choice": "auto",
        });

        info!(
            "Sending request with {} tools to chat completions API: model={}",
            tools.len(),
            model
        );
        let response = self.send(&request).await?;
        info!(
            "Received response from chat completions API ({} tool calls)",
            response.tool_calls.len()
        );
        Ok(response)
    }

    fn get_default_model(&self) -> &'static str {
        "gpt-4.1-mini"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_content_and_usage() {
        let response = json!({
            "choices": [{ "message": { "role": "assistant", "content": "141" } }],
            "usage": { "prompt_tokens": 52, "completion_tokens": 2, "total_tokens": 54 }
        });
        let parsed = parse_completion(&response).unwrap();
        assert_eq!(parsed.content, "141");
        assert!(parsed.tool_calls.is_empty());
        assert_eq!(parsed.usage.unwrap().total_tokens, 54);
    }

    #[test]
    fn parses_tool_calls_with_null_content() {
        let response = json!({
            "choices": [{ "message": {
                "role": "assistant",
                "content": null,
                "tool_calls": [{
                    "id": "call_abc",
                    "type": "function",
                    "function": { "name": "find_building", "arguments": "{\"query\":\"hana\"}" }
                }]
            } }]
        });
        let parsed = parse_completion(&response).unwrap();
        assert_eq!(parsed.content, "");
        assert_eq!(
            parsed.tool_calls,
            vec![ToolCall {
                id: "call_abc".to_string(),
                name: "find_building".to_string(),
                arguments: r#"{"query":"hana"}"#.to_string(),
            }]
        );
    }

    #[test]
    fn rejects_responses_without_message() {
        assert!(parse_completion(&json!({ "choices": [] })).is_err());
        assert!(parse_completion(&json!({ "choices": [{ "message": { "content": null } }] })).is_err());
    }

    #[test]
    fn wire_messages_carry_tool_fields() {
        let call = ToolCall {
            id: "call_1".to_string(),
            name: "find_building".to_string(),
            arguments: "{}".to_string(),
        };

        let assistant = wire_message(&ChatMessage::assistant_tool_calls("", vec![call]));
        assert_eq!(assistant["role"], "assistant");
        assert_eq!(assistant["tool_calls"][0]["type"], "function");
        assert_eq!(assistant["tool_calls"][0]["function"]["name"], "find_building");

        let tool = wire_message(&ChatMessage::tool_result("call_1", r#"{"found":false}"#));
        assert_eq!(tool["role"], "tool");
        assert_eq!(tool["tool_call_id"], "call_1");

        let user = wire_message(&ChatMessage::user("hi"));
        assert!(user.get("tool_calls").is_none());
        assert!(user.get("tool_call_id").is_none());
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let provider = OpenAiProvider::new("key".to_string(), Duration::from_secs(5))
            .unwrap()
            .with_base_url("http://localhost:8080/v1/".to_string());
        assert_eq!(provider.base_url, "http://localhost:8080/v1");
    }
}
