//! Extraction Module - recovering JSON values from model completions.
//!
//! Language-model output is not reliably pure JSON. Extraction is lenient on
//! the input side; the normalizers downstream are strict on the output side.

mod structured;

pub use structured::{extract_array, extract_object};
