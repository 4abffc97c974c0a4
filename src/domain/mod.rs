//! Domain layer - pure business types and rules.

pub mod chat;
