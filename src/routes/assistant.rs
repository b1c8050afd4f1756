use crate::error::Result;
use crate::models::assistant::{ChatRequest, ChatResponse};
use crate::AppState;
use axum::{extract::State, Json};
use std::sync::Arc;

/// POST /assistant/chat
/// One conversational turn; omit `sessionId` to start a new conversation
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>> {
    Ok(Json(state.assistant.chat(&request).await?))
}
