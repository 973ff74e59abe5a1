//! Chat memory HTTP handler.
//!
//! Endpoints:
//! - GET /chatMemory/{chat_id}/{memory_name} - List memories of one category for a chat

use axum::Json;
use axum::extract::{Path, State};

use copilot_core::sanitize::sanitize_log_input;

use crate::http::error::AppError;
use crate::http::extractors::chat_id::parse_chat_id;
use crate::http::extractors::participant::RequireChatParticipant;
use crate::state::AppState;

/// GET /chatMemory/{chat_id}/{memory_name} - Memory texts stored for the chat.
///
/// 200 with a (possibly empty) JSON array of strings, 400 when the chat
/// session does not exist or the memory name is not configured, 404 when
/// the chat id is not a GUID.
pub async fn get_chat_memories(
    State(state): State<AppState>,
    participant: RequireChatParticipant,
    Path((chat_id, memory_name)): Path<(String, String)>,
) -> Result<Json<Vec<String>>, AppError> {
    if let Some(user_id) = &participant.user_id {
        tracing::debug!(user_id = %sanitize_log_input(user_id), "participant verified");
    }

    let chat_id = parse_chat_id(&chat_id)?;
    let memories = state
        .memory_service
        .get_memories(&chat_id, &memory_name)
        .await?;

    Ok(Json(memories))
}
