//! Session existence check consumed by the memory query path.

use std::future::Future;
use std::sync::Arc;

use copilot_types::chat::ChatSession;
use copilot_types::error::RepositoryError;

use crate::storage::context::StorageContext;
use crate::storage::repository::Repository;

/// Answers whether a chat session exists. The session itself is not needed.
pub trait SessionLookup: Send + Sync {
    fn session_exists(
        &self,
        chat_id: &str,
    ) -> impl Future<Output = Result<bool, RepositoryError>> + Send;
}

impl<C: StorageContext<ChatSession>> SessionLookup for Repository<ChatSession, C> {
    async fn session_exists(&self, chat_id: &str) -> Result<bool, RepositoryError> {
        Ok(self.try_find_by_id(chat_id).await?.is_some())
    }
}

impl<L: SessionLookup> SessionLookup for Arc<L> {
    fn session_exists(
        &self,
        chat_id: &str,
    ) -> impl Future<Output = Result<bool, RepositoryError>> + Send {
        (**self).session_exists(chat_id)
    }
}
