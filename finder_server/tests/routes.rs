//! Route tests driven through the router with a canned language model.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use finder_core::{
    AssistantConfig, BuildingRecord, Catalog, ChatMessage, FinderAssistant, LLMProvider,
    LLMResponse,
};
use finder_server::{AppState, router};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

/// Answers every extraction request with the same identifier.
struct FixedExtraction(Option<&'static str>);

#[async_trait]
impl LLMProvider for FixedExtraction {
    async fn chat(&self, _messages: &[ChatMessage], _model: &str) -> anyhow::Result<LLMResponse> {
        match self.0 {
            Some(identifier) => Ok(LLMResponse {
                content: identifier.to_string(),
                ..LLMResponse::default()
            }),
            None => Err(anyhow::anyhow!("upstream timed out")),
        }
    }

    async fn chat_with_tools(
        &self,
        messages: &[ChatMessage],
        _tools: &[Value],
        model: &str,
    ) -> anyhow::Result<LLMResponse> {
        self.chat(messages, model).await
    }

    fn get_default_model(&self) -> &'static str {
        "fixed"
    }
}

fn app(extraction: Option<&'static str>) -> axum::Router {
    let catalog = Catalog::new(vec![BuildingRecord {
        campus_kr: "서울".to_string(),
        campus_en: "Seoul".to_string(),
        name_kr: "하나스퀘어".to_string(),
        name_en: "Hana Square".to_string(),
        map_link: "https://map.example/141".to_string(),
        nickname: "하나,HanaSquare".to_string(),
        code: "141".to_string(),
    }]);
    let provider: Arc<dyn LLMProvider> = Arc::new(FixedExtraction(extraction));
    let assistant = FinderAssistant::new(provider, catalog, AssistantConfig::default());
    router(AppState::new(assistant))
}

fn chat_request(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_check_reports_ok() {
    let response = app(Some("141"))
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({ "status": "ok" }));
}

#[tokio::test]
async fn chat_replies_with_matched_building() {
    let response = app(Some("hana"))
        .oneshot(chat_request("/chat", &json!({ "message": "Where is Hana Square?" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let reply = body["reply"].as_str().unwrap();
    assert!(reply.contains("Code: 141"));
    assert!(reply.contains("https://map.example/141"));
}

#[tokio::test]
async fn trailing_slash_alias_is_served() {
    let response = app(Some("141"))
        .oneshot(chat_request("/chat/", &json!({ "message": "141 어디야?" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert!(body["reply"].as_str().unwrap().starts_with("요청하신 건물 정보입니다."));
}

#[tokio::test]
async fn miss_is_still_200_with_text_reply() {
    let response = app(Some("없는건물"))
        .oneshot(chat_request("/chat", &json!({ "message": "없는건물 어디야?" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await["reply"],
        finder_core::reply::not_found(finder_core::Language::Korean)
    );
}

#[tokio::test]
async fn upstream_failure_is_a_polite_reply() {
    let response = app(None)
        .oneshot(chat_request("/chat", &json!({ "message": "where is 141" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await["reply"],
        finder_core::reply::upstream_failure(finder_core::Language::English)
    );
}

#[tokio::test]
async fn body_without_message_is_rejected() {
    let response = app(Some("141"))
        .oneshot(chat_request("/chat", &json!({ "text": "141" })))
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}
