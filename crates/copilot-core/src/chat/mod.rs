//! Chat session lookup port.

pub mod lookup;
