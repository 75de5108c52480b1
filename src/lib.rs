//! Decision Ranker - AI-assisted weighted-criteria ranking
//!
//! Helps a user choose among a few named products: a chat-completion model
//! suggests criteria, per-criterion descriptions and 1-10 scores, its loose
//! output is normalized into strict types, and a pure engine ranks the
//! products by weighted score with a short explanation for each.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
