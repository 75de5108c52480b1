//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers and error types
//! that form the vocabulary of the ranking domain.

mod errors;
mod ids;
mod score;
mod weight;

pub use errors::{ErrorCode, ValidationError};
pub use ids::SessionId;
pub use score::Score;
pub use weight::Weight;
