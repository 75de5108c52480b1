//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `decision` - Criteria, products, details and the score matrix
//! - `extraction` - Lenient JSON recovery from model completions
//! - `normalization` - Strict coercion of extracted data into domain values
//! - `analysis` - Weighted ranking and explanations

pub mod analysis;
pub mod decision;
pub mod extraction;
pub mod foundation;
pub mod normalization;
