//! Semantic memory retrieval for chat sessions.

pub mod categories;
pub mod client;
pub mod service;
