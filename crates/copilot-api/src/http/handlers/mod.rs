//! HTTP request handlers.

pub mod memory;
