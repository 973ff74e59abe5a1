//! HTTP/REST API layer.
//!
//! Axum-based API serving chat memory queries, with an optional chat
//! participant check and the shared error envelope format.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
