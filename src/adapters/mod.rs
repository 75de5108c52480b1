//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the application to external systems:
//! - `ai` - Completion providers (OpenAI-compatible HTTP, mock)
//! - `storage` - Session stores (in-memory, file)
//! - `http` - axum REST surface

pub mod ai;
pub mod http;
pub mod storage;
