//! Ports and business logic for the chat copilot memory service.
//!
//! This crate defines the storage and memory-search "ports" that the
//! infrastructure layer (copilot-infra) implements, the generic repository
//! built on them, and the chat memory query service. It depends only on
//! `copilot-types` -- never on `copilot-infra` or any database/IO crate.

pub mod chat;
pub mod memory;
pub mod sanitize;
pub mod storage;
