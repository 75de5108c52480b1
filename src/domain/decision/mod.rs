//! Decision entities owned by a session: criteria, products, details and scores.

mod criterion;
mod inputs;
mod product_detail;
mod score_matrix;

pub use criterion::Criterion;
pub use inputs::{CriteriaSet, ProductSet, Topic};
pub use product_detail::ProductDetail;
pub use score_matrix::ScoreMatrix;
