//! HTTP adapter for the chat endpoint.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::ChatAppState;
pub use routes::{chat_router, chat_routes};
