//! Generic domain repository.
//!
//! `Repository<T, C>` wraps a storage context for one entity type. Domain
//! repositories are type aliases over it, with extra finders added as
//! inherent impls on the concrete entity type.

use std::marker::PhantomData;

use copilot_types::chat::{ChatParticipant, ChatSession};
use copilot_types::error::RepositoryError;
use copilot_types::storage::StorageEntity;

use super::context::StorageContext;

/// Repository over any [`StorageContext`] for entity type `T`.
pub struct Repository<T, C> {
    context: C,
    _entity: PhantomData<fn() -> T>,
}

/// Repository of chat sessions.
pub type ChatSessionRepository<C> = Repository<ChatSession, C>;

/// Repository of chat participants.
pub type ChatParticipantRepository<C> = Repository<ChatParticipant, C>;

impl<T, C> Repository<T, C>
where
    T: StorageEntity,
    C: StorageContext<T>,
{
    pub fn new(context: C) -> Self {
        Self {
            context,
            _entity: PhantomData,
        }
    }

    pub async fn create(&self, entity: &T) -> Result<(), RepositoryError> {
        self.context.create(entity).await
    }

    pub async fn delete(&self, entity: &T) -> Result<(), RepositoryError> {
        self.context.delete(entity).await
    }

    pub async fn upsert(&self, entity: &T) -> Result<(), RepositoryError> {
        self.context.upsert(entity).await
    }

    /// Fetch by id, failing with `NotFound` when absent.
    pub async fn find_by_id(&self, id: &str) -> Result<T, RepositoryError> {
        self.context.read(id, id).await
    }

    /// Fetch by id, returning `None` for absent or blank ids.
    ///
    /// Backend failures still propagate.
    pub async fn try_find_by_id(&self, id: &str) -> Result<Option<T>, RepositoryError> {
        match self.context.read(id, id).await {
            Ok(entity) => Ok(Some(entity)),
            Err(RepositoryError::NotFound(_) | RepositoryError::InvalidId { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn query<P>(&self, predicate: P) -> Result<Vec<T>, RepositoryError>
    where
        P: Fn(&T) -> bool + Send + Sync,
    {
        self.context.query_entities(predicate).await
    }
}

impl<C: StorageContext<ChatParticipant>> Repository<ChatParticipant, C> {
    /// All chats a user takes part in.
    pub async fn find_by_user_id(
        &self,
        user_id: &str,
    ) -> Result<Vec<ChatParticipant>, RepositoryError> {
        self.query(|p| p.user_id == user_id).await
    }

    /// All participants of a chat.
    pub async fn find_by_chat_id(
        &self,
        chat_id: &str,
    ) -> Result<Vec<ChatParticipant>, RepositoryError> {
        self.query(|p| p.chat_id == chat_id).await
    }

    pub async fn is_user_in_chat(
        &self,
        user_id: &str,
        chat_id: &str,
    ) -> Result<bool, RepositoryError> {
        let matches = self
            .query(|p| p.user_id == user_id && p.chat_id == chat_id)
            .await?;
        Ok(!matches.is_empty())
    }
}
