//! Weight value object (1-10 importance scale).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Importance the user assigns to a criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Weight(u8);

impl Weight {
    /// Weight given to criteria the user has not adjusted yet.
    ///
    /// Suggested criteria always start here; the model never sets importance.
    pub const DEFAULT: Self = Self(5);

    /// Creates a Weight, returning error if outside 1..=10.
    pub fn try_new(value: i64) -> Result<Self, ValidationError> {
        if !(1..=10).contains(&value) {
            return Err(ValidationError::out_of_range(
                "weight",
                1,
                10,
                value.clamp(i32::MIN as i64, i32::MAX as i64) as i32,
            ));
        }
        Ok(Self(value as u8))
    }

    /// Returns the value as u8.
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl Default for Weight {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<i64> for Weight {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<Weight> for u8 {
    fn from(weight: Weight) -> Self {
        weight.0
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_weight_is_five() {
        assert_eq!(Weight::default().value(), 5);
    }

    #[test]
    fn try_new_rejects_out_of_range() {
        assert!(Weight::try_new(0).is_err());
        assert!(Weight::try_new(11).is_err());
        assert_eq!(Weight::try_new(10).unwrap().value(), 10);
    }

    #[test]
    fn out_of_range_error_names_field() {
        let err = Weight::try_new(42).unwrap_err();
        assert_eq!(err.to_string(), "Field 'weight' must be between 1 and 10, got 42");
    }

    #[test]
    fn deserializes_from_integer() {
        let weight: Weight = serde_json::from_str("8").unwrap();
        assert_eq!(weight.value(), 8);
        assert!(serde_json::from_str::<Weight>("-1").is_err());
    }
}
