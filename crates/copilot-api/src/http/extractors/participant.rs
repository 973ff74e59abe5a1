//! Chat participant authorization extractor.
//!
//! When `[auth] require_chat_participant` is enabled, the caller's user id
//! is read from the configured header and must belong to a participant of
//! the chat named by the `chat_id` path parameter. When disabled, the check
//! is left to whatever sits in front of the service.

use std::collections::HashMap;

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;

use crate::http::error::AppError;
use crate::http::extractors::chat_id::parse_chat_id;
use crate::state::AppState;
use copilot_core::sanitize::sanitize_log_input;

/// Marker proving the caller may access the requested chat.
pub struct RequireChatParticipant {
    /// Authenticated user id, when the check is enabled.
    pub user_id: Option<String>,
}

impl FromRequestParts<AppState> for RequireChatParticipant {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if !state.auth.require_chat_participant {
            return Ok(Self { user_id: None });
        }

        let user_id = parts
            .headers
            .get(state.auth.user_id_header.as_str())
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
            .ok_or_else(|| {
                AppError::Unauthorized(format!(
                    "Missing user identity. Provide it via the '{}' header.",
                    state.auth.user_id_header
                ))
            })?;

        let Path(params) = Path::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::Validation(e.body_text()))?;
        let raw_chat_id = params
            .get("chat_id")
            .ok_or_else(|| AppError::Internal("route has no chat_id parameter".to_string()))?;
        let chat_id = parse_chat_id(raw_chat_id)?;

        if !state.participants.is_user_in_chat(&user_id, &chat_id).await? {
            tracing::warn!(
                user_id = %sanitize_log_input(&user_id),
                %chat_id,
                "user is not a participant of the chat"
            );
            return Err(AppError::Forbidden(
                "User does not have access to the chat session.".to_string(),
            ));
        }

        Ok(Self {
            user_id: Some(user_id),
        })
    }
}
