//! Application layer - use-case orchestration over the ports.

pub mod handlers;
