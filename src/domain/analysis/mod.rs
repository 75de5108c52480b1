//! Analysis Module - Pure domain services for decision analysis.
//!
//! All functions are pure and stateless. They take domain objects as input
//! and return computed results; no ports or adapters are involved.

mod ranking;

pub use ranking::{RankedProduct, RankingEngine};
