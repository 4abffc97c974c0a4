//! Adapters - concrete implementations of the ports.

pub mod assistant;
pub mod http;
pub mod memory;
pub mod postgres;
