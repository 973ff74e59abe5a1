//! Chat memory query service.
//!
//! Lists the semantic memories stored for a chat session under one memory
//! category. The memory index has no "list all" operation, so retrieval is a
//! wildcard search filtered by the `chatid` and `memory` tags with the
//! relevance threshold at zero: the wildcard carries no relevance signal and
//! every tagged memory is returned.

use copilot_types::error::MemoryError;
use copilot_types::memory::{MemoryFilter, CHAT_ID_TAG, MEMORY_TAG, WILDCARD_QUERY};
use tracing::{debug, error, warn};

use crate::chat::lookup::SessionLookup;
use crate::memory::categories::MemoryCategories;
use crate::memory::client::MemorySearchClient;
use crate::sanitize::sanitize_log_input;

/// Validates memory queries and forwards them to the memory search client.
///
/// Generic over `SessionLookup` and `MemorySearchClient` to keep copilot-core
/// free of infrastructure dependencies.
pub struct ChatMemoryService<S: SessionLookup, M: MemorySearchClient> {
    sessions: S,
    memory_client: M,
    categories: MemoryCategories,
    index_name: String,
}

impl<S: SessionLookup, M: MemorySearchClient> ChatMemoryService<S, M> {
    pub fn new(
        sessions: S,
        memory_client: M,
        categories: MemoryCategories,
        index_name: impl Into<String>,
    ) -> Self {
        Self {
            sessions,
            memory_client,
            categories,
            index_name: index_name.into(),
        }
    }

    /// Return every memory text stored for `chat_id` under `memory_name`.
    ///
    /// Fails with `SessionNotFound` or `InvalidMemoryName` before the search
    /// client is contacted. A connector failure (for example a missing
    /// index) means nothing has been stored yet and yields an empty list.
    pub async fn get_memories(
        &self,
        chat_id: &str,
        memory_name: &str,
    ) -> Result<Vec<String>, MemoryError> {
        let sanitized_chat_id = sanitize_log_input(chat_id);
        let sanitized_memory_name = sanitize_log_input(memory_name);

        if !self.sessions.session_exists(chat_id).await? {
            warn!(chat_id = %sanitized_chat_id, "chat session does not exist");
            return Err(MemoryError::SessionNotFound(sanitized_chat_id));
        }

        if !self.categories.contains(&sanitized_memory_name) {
            warn!(memory_name = %sanitized_memory_name, "memory name is invalid");
            return Err(MemoryError::InvalidMemoryName(sanitized_memory_name));
        }

        let filter = MemoryFilter::new()
            .by_tag(CHAT_ID_TAG, chat_id)
            .by_tag(MEMORY_TAG, sanitized_memory_name.as_str())
            .with_min_relevance(0.0);

        match self
            .memory_client
            .search(WILDCARD_QUERY, &self.index_name, &filter)
            .await
        {
            Ok(result) => {
                let memories = result.partition_texts();
                debug!(
                    chat_id = %sanitized_chat_id,
                    memory_name = %sanitized_memory_name,
                    count = memories.len(),
                    "memories retrieved"
                );
                Ok(memories)
            }
            Err(MemoryError::Connector(reason)) => {
                error!(
                    memory_name = %sanitized_memory_name,
                    index = %self.index_name,
                    error = %reason,
                    "cannot search collection"
                );
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }
}
