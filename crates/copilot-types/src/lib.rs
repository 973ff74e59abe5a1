//! Shared domain types for the chat copilot memory service.
//!
//! Contains the storable-entity contract, the chat entities persisted through
//! it, the semantic memory search result model, configuration types, and the
//! error enums shared by every layer.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod memory;
pub mod storage;
