//! Normalization Module - coercing extracted model output into domain values.
//!
//! Each normalizer takes the authoritative names from the caller and never
//! trusts the model for keys, weights or product names.

mod criteria;
mod detail;
mod scores;

pub use criteria::{criteria_from_completion, normalize_criteria};
pub use detail::{detail_from_completion, normalize_detail};
pub use scores::{normalize_scores, scores_from_completion, ProductScores};
