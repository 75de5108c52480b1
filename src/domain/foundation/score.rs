//! Score value object (1-10 scale).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// How well one product satisfies one criterion: 1 (extremely poor) to 10 (outstanding).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Score(u8);

impl Score {
    /// Lowest score on the scale.
    pub const MIN: Self = Self(1);

    /// Highest score on the scale.
    pub const MAX: Self = Self(10);

    /// Mid-scale value substituted when a rating is missing or unusable.
    pub const NEUTRAL: Self = Self(5);

    /// Creates a Score, returning error if out of range.
    pub fn try_new(value: i64) -> Result<Self, ValidationError> {
        if !(1..=10).contains(&value) {
            return Err(ValidationError::out_of_range(
                "score",
                1,
                10,
                value.clamp(i32::MIN as i64, i32::MAX as i64) as i32,
            ));
        }
        Ok(Self(value as u8))
    }

    /// Creates a Score from an arbitrary number.
    ///
    /// Non-finite input yields [`Score::NEUTRAL`]. Finite input is clamped to
    /// `[1, 10]` and rounded half-up.
    pub fn from_raw(value: f64) -> Self {
        if !value.is_finite() {
            return Self::NEUTRAL;
        }
        // After clamping the value is positive, so `round` is half-up.
        Self(value.clamp(1.0, 10.0).round() as u8)
    }

    /// Returns the value as u8.
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl Default for Score {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

impl TryFrom<i64> for Score {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<Score> for u8 {
    fn from(score: Score) -> Self {
        score.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
