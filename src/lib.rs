//! Gravity Backend - Assistant Chat Core
//!
//! This crate implements the chat backbone of the Gravity business backend:
//! a single chat endpoint orchestrating a remote assistant service under a
//! configurable session policy, with append-only transcript logging.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
