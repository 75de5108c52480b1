//! Criterion entity.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Weight;

/// A named, weighted dimension of comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Criterion {
    pub name: String,
    pub weight: Weight,
}

impl Criterion {
    /// Creates a criterion with an explicit weight.
    pub fn new(name: impl Into<String>, weight: Weight) -> Self {
        Self {
            name: name.into(),
            weight,
        }
    }

    /// Creates a criterion at the default weight.
    pub fn with_default_weight(name: impl Into<String>) -> Self {
        Self::new(name, Weight::DEFAULT)
    }

    /// Returns true if the name is blank once trimmed.
    pub fn is_blank(&self) -> bool {
        self.name.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_weight_constructor_uses_five() {
        let c = Criterion::with_default_weight("Cost");
        assert_eq!(c.weight.value(), 5);
    }

    #[test]
    fn blank_detection_ignores_whitespace() {
        assert!(Criterion::with_default_weight("   ").is_blank());
        assert!(!Criterion::with_default_weight(" x ").is_blank());
    }

    #[test]
    fn deserializes_from_wire_shape() {
        let c: Criterion = serde_json::from_str(r#"{"name":"Price","weight":7}"#).unwrap();
        assert_eq!(c, Criterion::new("Price", Weight::try_new(7).unwrap()));
    }

    #[test]
    fn rejects_weight_out_of_range() {
        assert!(serde_json::from_str::<Criterion>(r#"{"name":"Price","weight":0}"#).is_err());
    }
}
