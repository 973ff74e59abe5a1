//! Observability setup for the chat copilot memory service.

pub mod tracing_setup;
