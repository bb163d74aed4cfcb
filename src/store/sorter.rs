//! Document sorting
//!
//! Sorts are ascending and stable: documents that compare equal keep their
//! insertion order.

use std::cmp::Ordering;

use serde_json::Value;

/// Ascending sort on a single field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
}

impl SortSpec {
    pub fn ascending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }
}

/// Sorts documents
pub struct DocumentSorter;

impl DocumentSorter {
    /// Sorts documents according to the sort specification.
    pub fn sort(documents: &mut [Value], sort_spec: &SortSpec) {
        documents.sort_by(|a, b| {
            compare_values(a.get(&sort_spec.field), b.get(&sort_spec.field))
        });
    }
}

/// Total order over optional JSON values.
///
/// `DocumentSorter` uses it to order hotels by the `sort` field, where a
/// hotel without that field counts as missing. `distinct` uses it to return
/// field values in a stable order.
///
/// Values of different JSON types order by type first:
/// missing < null < bool < number < string < array < object.
/// Numbers compare as f64; arrays and objects compare equal within their type.
pub fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let (a, b) = match (a, b) {
        (Some(a), Some(b)) => (a, b),
        (a, b) => return a.is_some().cmp(&b.is_some()),
    };

    type_rank(a).cmp(&type_rank(b)).then_with(|| match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => {
            let x = x.as_f64().unwrap_or(0.0);
            let y = y.as_f64().unwrap_or(0.0);
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        _ => Ordering::Equal,
    })
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sort_numbers_ascending() {
        let mut docs = vec![json!({"price": 30}), json!({"price": 10.5}), json!({"price": 20})];
        DocumentSorter::sort(&mut docs, &SortSpec::ascending("price"));

        let prices: Vec<f64> = docs.iter().map(|d| d["price"].as_f64().unwrap()).collect();
        assert_eq!(prices, vec![10.5, 20.0, 30.0]);
    }

    #[test]
    fn test_sort_is_stable() {
        let mut docs = vec![
            json!({"location": "Rome", "n": 1}),
            json!({"location": "Paris", "n": 2}),
            json!({"location": "Rome", "n": 3}),
        ];
        DocumentSorter::sort(&mut docs, &SortSpec::ascending("location"));

        let order: Vec<i64> = docs.iter().map(|d| d["n"].as_i64().unwrap()).collect();
        assert_eq!(order, vec![2, 1, 3]);
    }

    #[test]
    fn test_unknown_field_keeps_order() {
        let mut docs = vec![json!({"n": 2}), json!({"n": 1})];
        DocumentSorter::sort(&mut docs, &SortSpec::ascending("missing"));

        assert_eq!(docs[0]["n"], 2);
    }

    #[test]
    fn test_cross_type_ordering() {
        assert_eq!(compare_values(None, Some(&json!(null))), Ordering::Less);
        assert_eq!(compare_values(Some(&json!(5)), Some(&json!("a"))), Ordering::Less);
        assert_eq!(compare_values(Some(&json!(true)), Some(&json!(0))), Ordering::Less);
    }
}
