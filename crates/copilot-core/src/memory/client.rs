//! Memory search client trait.
//!
//! Implementations (e.g., the HTTP client for a Kernel-Memory style service)
//! live in copilot-infra.

use std::future::Future;

use copilot_types::error::MemoryError;
use copilot_types::memory::{MemoryFilter, SearchResult};

/// Searches an external semantic memory index.
///
/// Backend failures, including a missing index, are reported as
/// [`MemoryError::Connector`].
pub trait MemorySearchClient: Send + Sync {
    fn search(
        &self,
        query: &str,
        index: &str,
        filter: &MemoryFilter,
    ) -> impl Future<Output = Result<SearchResult, MemoryError>> + Send;
}
