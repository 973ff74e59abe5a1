//! Generic entity storage.
//!
//! [`context::StorageContext`] is the port implemented per backend;
//! [`repository::Repository`] is the domain-facing wrapper over it.

pub mod context;
pub mod repository;
pub mod volatile;
