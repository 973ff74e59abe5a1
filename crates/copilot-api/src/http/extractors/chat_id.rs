//! Chat id path segment parsing.

use uuid::Uuid;

use copilot_core::sanitize::sanitize_log_input;

use crate::http::error::AppError;

/// Parse a chat id path segment into its canonical hyphenated form.
///
/// Chat ids are GUIDs. Anything else is treated as an unknown route, so the
/// session store is never consulted for it.
pub fn parse_chat_id(raw: &str) -> Result<String, AppError> {
    Uuid::try_parse(raw)
        .map(|id| id.to_string())
        .map_err(|_| {
            AppError::NotFound(format!(
                "Chat id {} is not a valid GUID.",
                sanitize_log_input(raw)
            ))
        })
}
