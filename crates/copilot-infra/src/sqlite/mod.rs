//! SQLite storage layer.
//!
//! A generic storage context backed by SQLite with WAL mode and split
//! read/write connection pools. Each entity type lives in its own table as
//! one JSON document per row.

pub mod context;
pub mod pool;
