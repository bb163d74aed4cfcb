//! # Filter Expressions
//!
//! Predicates applied to stored documents.
//!
//! Range comparisons only match values of the same JSON type: numbers are
//! compared with numbers and strings with strings. A missing field or a type
//! mismatch never matches.

use std::cmp::Ordering;

use serde_json::Value;

/// Filter operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOperator {
    /// Equals
    Eq,

    /// Greater than or equal
    Gte,

    /// Less than or equal
    Lte,
}

/// A filter expression
#[derive(Debug, Clone, PartialEq)]
pub struct FilterExpr {
    /// Field to filter on
    pub field: String,

    /// Comparison operator
    pub operator: FilterOperator,

    /// Value to compare against
    pub value: Value,
}

impl FilterExpr {
    pub fn new(field: impl Into<String>, operator: FilterOperator, value: Value) -> Self {
        Self {
            field: field.into(),
            operator,
            value,
        }
    }

    /// Create an equality filter
    pub fn eq(field: impl Into<String>, value: Value) -> Self {
        Self::new(field, FilterOperator::Eq, value)
    }

    /// Create a lower-bound filter
    pub fn gte(field: impl Into<String>, value: Value) -> Self {
        Self::new(field, FilterOperator::Gte, value)
    }

    /// Create an upper-bound filter
    pub fn lte(field: impl Into<String>, value: Value) -> Self {
        Self::new(field, FilterOperator::Lte, value)
    }

    /// Check if a document matches this filter
    pub fn matches(&self, doc: &Value) -> bool {
        let field_value = match doc.get(&self.field) {
            Some(v) => v,
            None => return false,
        };

        match self.operator {
            FilterOperator::Eq => json_eq(field_value, &self.value),
            FilterOperator::Gte => matches!(
                compare_same_type(field_value, &self.value),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            FilterOperator::Lte => matches!(
                compare_same_type(field_value, &self.value),
                Some(Ordering::Less | Ordering::Equal)
            ),
        }
    }
}

/// Equality where `40` and `40.0` are the same number
fn json_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(_), Value::Number(_)) => compare_same_type(a, b) == Some(Ordering::Equal),
        _ => a == b,
    }
}

/// Orders two values of the same JSON type; `None` when the types differ
fn compare_same_type(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(a), Value::Number(b)) => {
            let a = a.as_f64()?;
            let b = b.as_f64()?;
            a.partial_cmp(&b)
        }
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

/// A set of filters combined with AND logic
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSet {
    pub filters: Vec<FilterExpr>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn and(mut self, filter: FilterExpr) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Check if a document matches all filters
    pub fn matches(&self, doc: &Value) -> bool {
        self.filters.iter().all(|f| f.matches(doc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_eq_filter() {
        let filter = FilterExpr::eq("location", json!("Paris"));

        assert!(filter.matches(&json!({"location": "Paris"})));
        assert!(!filter.matches(&json!({"location": "Rome"})));
        assert!(!filter.matches(&json!({"name": "Paris"})));
    }

    #[test]
    fn test_eq_numbers_ignore_representation() {
        let filter = FilterExpr::eq("rooms", json!(40.0));
        assert!(filter.matches(&json!({"rooms": 40})));
    }

    #[test]
    fn test_range_bounds_inclusive() {
        let filters = FilterSet::new()
            .and(FilterExpr::gte("price", json!(50)))
            .and(FilterExpr::lte("price", json!(150)));

        assert!(filters.matches(&json!({"price": 50})));
        assert!(filters.matches(&json!({"price": 150.0})));
        assert!(filters.matches(&json!({"price": 99.5})));
        assert!(!filters.matches(&json!({"price": 49.99})));
        assert!(!filters.matches(&json!({"price": 151})));
    }

    #[test]
    fn test_range_type_mismatch_never_matches() {
        let filter = FilterExpr::gte("price", json!(50));

        assert!(!filter.matches(&json!({"price": "100"})));
        assert!(!filter.matches(&json!({"price": null})));
        assert!(!filter.matches(&json!({})));
    }

    #[test]
    fn test_empty_set_matches_everything() {
        let filters = FilterSet::new();
        assert!(filters.is_empty());
        assert!(filters.matches(&json!({"anything": 1})));
    }
}
