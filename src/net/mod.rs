//! Networking for the chat endpoints.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` performs the HTTP calls and `types` defines the wire schema shared
//! with the runtime.

pub mod api;
pub mod types;
