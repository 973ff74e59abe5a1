//! Semantic memory service client.

pub mod http_client;
pub mod types;
