//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `AIProvider` - Text-completion service used by the suggestion handlers
//! - `SessionStore` - Key-value blob storage for decision sessions

mod ai_provider;
mod session_store;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, Message,
    MessageRole, Operation, ProviderInfo, RequestMetadata, TokenUsage,
};
pub use session_store::{SessionStore, SessionStoreError};
