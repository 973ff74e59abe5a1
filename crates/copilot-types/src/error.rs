use thiserror::Error;

/// Errors from storage context and repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The entity identifier was empty or whitespace. Raised before any I/O.
    #[error("{field} cannot be null or empty")]
    InvalidId { field: &'static str },

    #[error("entity with id {0} not found")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("invalid table name: '{0}'")]
    InvalidTable(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),
}

impl RepositoryError {
    /// Whether this error reports bad input rather than backend state.
    pub fn is_validation(&self) -> bool {
        matches!(self, RepositoryError::InvalidId { .. })
    }
}

/// Errors from the chat memory query path.
#[derive(Debug, Error)]
pub enum MemoryError {
    #[error("Chat session: {0} does not exist.")]
    SessionNotFound(String),

    #[error("Memory name: {0} is invalid.")]
    InvalidMemoryName(String),

    /// The memory search backend failed (unreachable, missing index, bad payload).
    #[error("memory connector error: {0}")]
    Connector(String),

    #[error("storage error: {0}")]
    Storage(#[from] RepositoryError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_id_display() {
        let err = RepositoryError::InvalidId { field: "entity.id" };
        assert_eq!(err.to_string(), "entity.id cannot be null or empty");
        assert!(err.is_validation());
    }

    #[test]
    fn test_not_found_is_not_validation() {
        let err = RepositoryError::NotFound("abc".to_string());
        assert_eq!(err.to_string(), "entity with id abc not found");
        assert!(!err.is_validation());
    }

    #[test]
    fn test_memory_error_messages() {
        let err = MemoryError::SessionNotFound("c1".to_string());
        assert_eq!(err.to_string(), "Chat session: c1 does not exist.");

        let err = MemoryError::InvalidMemoryName("bogus".to_string());
        assert_eq!(err.to_string(), "Memory name: bogus is invalid.");
    }

    #[test]
    fn test_memory_error_from_repository() {
        let err: MemoryError = RepositoryError::Connection.into();
        assert!(matches!(err, MemoryError::Storage(RepositoryError::Connection)));
    }
}
