//! In-process storage context.
//!
//! Keeps entities in a concurrent map. Nothing is persisted; useful for
//! tests and for running the service without a database. Query results come
//! back in map iteration order, which is unspecified.

use copilot_types::error::RepositoryError;
use copilot_types::storage::{validate_entity_id, StorageEntity};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use super::context::StorageContext;

/// Map-backed implementation of [`StorageContext`].
pub struct VolatileContext<T: StorageEntity> {
    entities: DashMap<String, T>,
}

impl<T: StorageEntity> VolatileContext<T> {
    pub fn new() -> Self {
        Self {
            entities: DashMap::new(),
        }
    }
}

impl<T: StorageEntity> Default for VolatileContext<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: StorageEntity> StorageContext<T> for VolatileContext<T> {
    async fn query_entities<P>(&self, predicate: P) -> Result<Vec<T>, RepositoryError>
    where
        P: Fn(&T) -> bool + Send + Sync,
    {
        Ok(self
            .entities
            .iter()
            .filter(|entry| predicate(entry.value()))
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn create(&self, entity: &T) -> Result<(), RepositoryError> {
        validate_entity_id(entity.id(), "entity.id")?;

        match self.entities.entry(entity.id().to_string()) {
            Entry::Occupied(_) => Err(RepositoryError::Conflict(format!(
                "entity with id {} already exists",
                entity.id()
            ))),
            Entry::Vacant(slot) => {
                slot.insert(entity.clone());
                Ok(())
            }
        }
    }

    async fn read(&self, entity_id: &str, _partition_key: &str) -> Result<T, RepositoryError> {
        validate_entity_id(entity_id, "entity_id")?;

        self.entities
            .get(entity_id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| RepositoryError::NotFound(entity_id.to_string()))
    }

    async fn upsert(&self, entity: &T) -> Result<(), RepositoryError> {
        validate_entity_id(entity.id(), "entity.id")?;

        self.entities
            .insert(entity.id().to_string(), entity.clone());
        Ok(())
    }

    async fn delete(&self, entity: &T) -> Result<(), RepositoryError> {
        validate_entity_id(entity.id(), "entity.id")?;

        self.entities.remove(entity.id());
        Ok(())
    }
}
