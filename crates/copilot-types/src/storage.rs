//! The storable-entity contract.
//!
//! Anything persisted through a storage context only has to expose a stable
//! string key. The partition key exists for backends that shard by it; the
//! relational backend ignores it.

use crate::error::RepositoryError;

/// A record that can be persisted by a storage context.
pub trait StorageEntity: Clone + Send + Sync + 'static {
    /// Unique identifier, used as primary key and as the upsert key.
    fn id(&self) -> &str;

    /// Partition key for partitioned backends. Defaults to the id.
    fn partition(&self) -> &str {
        self.id()
    }
}

/// Reject empty or whitespace-only identifiers.
///
/// Every mutating storage operation calls this before touching the backend.
pub fn validate_entity_id(id: &str, field: &'static str) -> Result<(), RepositoryError> {
    if id.trim().is_empty() {
        return Err(RepositoryError::InvalidId { field });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone)]
    struct Note {
        id: String,
    }

    impl StorageEntity for Note {
        fn id(&self) -> &str {
            &self.id
        }
    }

    #[test]
    fn test_partition_defaults_to_id() {
        let note = Note { id: "n-1".to_string() };
        assert_eq!(note.partition(), "n-1");
    }

    #[test]
    fn test_validate_entity_id() {
        assert!(validate_entity_id("abc", "entity.id").is_ok());
        assert!(matches!(
            validate_entity_id("", "entity.id"),
            Err(RepositoryError::InvalidId { field: "entity.id" })
        ));
        assert!(validate_entity_id("  \t\n", "entity_id").is_err());
    }
}
