use serde::{Deserialize, Serialize};

/// POST /chat request
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// POST /chat response
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

/// GET / response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
