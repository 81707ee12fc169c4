use axum::{Json, extract::State};
use tracing::{Instrument, info, info_span};
use uuid::Uuid;

use crate::dto::{ChatRequest, ChatResponse, HealthResponse};
use crate::state::AppState;

/// POST /chat - Answer a question about a campus building
///
/// Always 200: misses and upstream failures come back as reply text.
pub async fn chat(State(state): State<AppState>, Json(req): Json<ChatRequest>) -> Json<ChatResponse> {
    let request_id = Uuid::now_v7();
    let span = info_span!("chat", %request_id);

    async move {
        info!(message_chars = req.message.chars().count(), "Chat request");
        let reply = state.assistant.reply(&req.message).await;
        info!(reply_chars = reply.chars().count(), "Chat reply");
        Json(ChatResponse { reply })
    }
    .instrument(span)
    .await
}

/// GET / - Health check
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
