//! Infrastructure layer for the chat copilot memory service.
//!
//! Contains implementations of the ports defined in `copilot-core`: the
//! SQLite storage context, the HTTP semantic memory client, and the
//! configuration loader.

pub mod config;
pub mod memory;
pub mod sqlite;
