//! Request extractors.

pub mod chat_id;
pub mod participant;
