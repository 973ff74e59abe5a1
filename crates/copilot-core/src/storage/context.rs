//! Storage context trait.
//!
//! A storage context persists one entity type into one table (or container).
//! Implementations live in copilot-infra (`SqliteStorageContext`) and in
//! [`super::volatile`] for in-process use.

use std::future::Future;

use copilot_types::error::RepositoryError;
use copilot_types::storage::StorageEntity;

/// CRUD and query access to a single entity table.
///
/// Every mutating method rejects an empty or whitespace id with
/// [`RepositoryError::InvalidId`] before any I/O.
/// Uses RPITIT (native async fn in traits, Rust 2024 edition).
pub trait StorageContext<T: StorageEntity>: Send + Sync {
    /// Load every entity and keep those matching `predicate`, in storage order.
    fn query_entities<P>(
        &self,
        predicate: P,
    ) -> impl Future<Output = Result<Vec<T>, RepositoryError>> + Send
    where
        P: Fn(&T) -> bool + Send + Sync;

    /// Insert a new entity. A duplicate id fails with `Conflict`.
    fn create(&self, entity: &T) -> impl Future<Output = Result<(), RepositoryError>> + Send;

    /// Fetch an entity by id. `partition_key` is ignored by unpartitioned backends.
    fn read(
        &self,
        entity_id: &str,
        partition_key: &str,
    ) -> impl Future<Output = Result<T, RepositoryError>> + Send;

    /// Insert the entity, or replace the stored one with the same id.
    fn upsert(&self, entity: &T) -> impl Future<Output = Result<(), RepositoryError>> + Send;

    /// Remove the entity. Removing an absent entity is a no-op.
    fn delete(&self, entity: &T) -> impl Future<Output = Result<(), RepositoryError>> + Send;
}
