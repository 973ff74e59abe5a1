//! Chat session administration commands.

use copilot_types::chat::{ChatParticipant, ChatSession};

use crate::state::AppState;

pub async fn create_session(
    state: &AppState,
    title: String,
    system_description: String,
    json: bool,
) -> anyhow::Result<()> {
    let session = ChatSession::new(title, system_description);
    state.sessions.create(&session).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&session)?);
    } else {
        println!("Created chat session {} ({})", session.id, session.title);
    }
    Ok(())
}

pub async fn list_sessions(state: &AppState, json: bool) -> anyhow::Result<()> {
    let sessions = state.sessions.query(|_| true).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&sessions)?);
        return Ok(());
    }

    if sessions.is_empty() {
        println!("No chat sessions.");
        return Ok(());
    }
    for session in &sessions {
        println!(
            "{}  {}  {}",
            session.id,
            session.created_on.format("%Y-%m-%d %H:%M"),
            session.title
        );
    }
    Ok(())
}

pub async fn delete_session(state: &AppState, id: &str, json: bool) -> anyhow::Result<()> {
    let session = state.sessions.find_by_id(id).await?;
    state.sessions.delete(&session).await?;

    for participant in state.participants.find_by_chat_id(id).await? {
        state.participants.delete(&participant).await?;
    }

    if json {
        println!("{}", serde_json::json!({ "deleted": id }));
    } else {
        println!("Deleted chat session {id}");
    }
    Ok(())
}

pub async fn add_participant(
    state: &AppState,
    chat_id: &str,
    user_id: &str,
    json: bool,
) -> anyhow::Result<()> {
    // Fails with NotFound for an unknown chat.
    state.sessions.find_by_id(chat_id).await?;

    if state.participants.is_user_in_chat(user_id, chat_id).await? {
        println!("User {user_id} already participates in {chat_id}");
        return Ok(());
    }

    let participant = ChatParticipant::new(user_id, chat_id);
    state.participants.create(&participant).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&participant)?);
    } else {
        println!("Added {user_id} to chat session {chat_id}");
    }
    Ok(())
}
