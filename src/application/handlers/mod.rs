//! Application handlers.

pub mod chat;
