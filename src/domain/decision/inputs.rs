//! Validated operation inputs: topic, product set and criteria set.
//!
//! Validation happens here, before any gateway call. Blank values are
//! rejected and duplicate names are refused, since the Ranking Engine sums
//! contributions per criterion name and a duplicate would count that
//! criterion's weight twice. Product names are never rewritten: a product is
//! identified by the caller's literal string, and score rows are joined on it.

use std::collections::HashSet;

use super::Criterion;
use crate::domain::foundation::ValidationError;

/// Decision topic, trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic(String);

impl Topic {
    pub fn new(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("topic"));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Ordered list of unique product names, exactly as supplied.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProductSet(Vec<String>);

impl ProductSet {
    /// Validates a possibly-empty product list.
    ///
    /// Blank names are rejected. Duplicates are compared on the literal
    /// string, so `"A"` and `" A"` are two products.
    pub fn new(raw: Vec<String>) -> Result<Self, ValidationError> {
        let mut seen = HashSet::new();

        for name in &raw {
            if name.trim().is_empty() {
                return Err(ValidationError::empty_field("products"));
            }
            if !seen.insert(name.as_str()) {
                return Err(ValidationError::duplicate("products", name.clone()));
            }
        }

        Ok(Self(raw))
    }

    /// Validates a product list that must contain at least one product.
    pub fn non_empty(raw: Vec<String>) -> Result<Self, ValidationError> {
        let set = Self::new(raw)?;
        if set.is_empty() {
            return Err(ValidationError::empty_field("products"));
        }
        Ok(set)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Ordered, non-empty list of criteria with unique trimmed names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CriteriaSet(Vec<Criterion>);

impl CriteriaSet {
    /// Trims names, drops blank rows and rejects duplicates.
    ///
    /// At least one criterion must remain.
    pub fn new(raw: Vec<Criterion>) -> Result<Self, ValidationError> {
        let set = Self::allowing_empty(raw)?;
        if set.is_empty() {
            return Err(ValidationError::empty_field("criteria"));
        }
        Ok(set)
    }

    /// Like [`CriteriaSet::new`], but an empty result is accepted.
    ///
    /// Used where criteria are optional, such as ranking a saved session.
    pub fn allowing_empty(raw: Vec<Criterion>) -> Result<Self, ValidationError> {
        let mut seen = HashSet::new();
        let mut criteria = Vec::with_capacity(raw.len());

        for criterion in raw {
            if criterion.is_blank() {
                continue;
            }
            let name = criterion.name.trim().to_string();
            if !seen.insert(name.clone()) {
                return Err(ValidationError::duplicate("criteria", name));
            }
            criteria.push(Criterion::new(name, criterion.weight));
        }

        Ok(Self(criteria))
    }

    pub fn as_slice(&self) -> &[Criterion] {
        &self.0
    }

    /// Authoritative criterion names, in order.
    pub fn names(&self) -> Vec<String> {
        self.0.iter().map(|c| c.name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
