//! # Courier API
//!
//! Telegram Bot API HTTP client implementing the `courier-core`
//! [`Transport`](courier_core::Transport) boundary: method calls over
//! JSON, file uploads over multipart, and decoding of the response
//! envelope and inbound update objects.

pub mod client;
pub mod wire;

pub use client::{ApiClient, DEFAULT_API_URL};
