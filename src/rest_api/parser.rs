//! # Query Parameter Parser
//!
//! Parses REST API query parameters into store queries.
//!
//! Empty parameters are treated as absent. Range parameters (`min,max`)
//! that do not split into exactly two parts are ignored rather than
//! rejected; two parts that are not numbers are rejected.

use std::collections::HashMap;

use serde_json::{Number, Value};

use crate::store::{FilterExpr, FilterSet, FindQuery, SortSpec};

use super::errors::{RestError, RestResult};

/// Page used when none is given
pub const DEFAULT_PAGE: u64 = 1;

/// Page size used when none is given
pub const DEFAULT_LIMIT: u64 = 10;

/// Field `GET /hotels/distinct` reports when none is given
pub const DEFAULT_DISTINCT_FIELD: &str = "location";

/// Inclusive numeric range parsed from `min,max`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeParam {
    pub min: f64,
    pub max: f64,
}

impl RangeParam {
    /// Parses `min,max`.
    ///
    /// Returns `Ok(None)` when the value does not have exactly two parts.
    pub fn parse(name: &str, value: &str) -> RestResult<Option<Self>> {
        let parts: Vec<&str> = value.split(',').collect();
        if parts.len() != 2 {
            return Ok(None);
        }

        Ok(Some(Self {
            min: parse_bound(name, parts[0])?,
            max: parse_bound(name, parts[1])?,
        }))
    }

    /// The `gte`/`lte` pair for this range on `field`
    pub fn filters(&self, field: &str) -> [FilterExpr; 2] {
        [
            FilterExpr::gte(field, number(self.min)),
            FilterExpr::lte(field, number(self.max)),
        ]
    }
}

fn parse_bound(name: &str, raw: &str) -> RestResult<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| {
            RestError::InvalidQueryParam(format!("{} bound is not a number: '{}'", name, raw))
        })
}

fn number(n: f64) -> Value {
    // bounds are finite, so from_f64 always succeeds
    Number::from_f64(n).map(Value::Number).unwrap_or(Value::Null)
}

/// Parsed `GET /hotels` parameters
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    pub location: Option<String>,
    pub price: Option<RangeParam>,
    pub rooms: Option<RangeParam>,
    pub sort: Option<String>,
    pub page: u64,
    pub limit: u64,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            location: None,
            price: None,
            rooms: None,
            sort: None,
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl ListQuery {
    /// Parse query parameters from a HashMap
    pub fn parse(params: &HashMap<String, String>) -> RestResult<Self> {
        let mut result = ListQuery::default();

        if let Some(location) = param(params, "location") {
            result.location = Some(location.to_string());
        }
        if let Some(price) = param(params, "price") {
            result.price = RangeParam::parse("price", price)?;
        }
        if let Some(rooms) = param(params, "rooms") {
            result.rooms = RangeParam::parse("rooms", rooms)?;
        }
        if let Some(sort) = param(params, "sort") {
            result.sort = Some(sort.to_string());
        }
        if let Some(page) = param(params, "page") {
            result.page = parse_positive("page", page)?;
        }
        if let Some(limit) = param(params, "limit") {
            result.limit = parse_positive("limit", limit)?;
        }

        Ok(result)
    }

    /// Number of records skipped before this page
    pub fn skip(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// Builds the filter set for this query
    pub fn filter(&self) -> FilterSet {
        let mut filters = FilterSet::new();

        if let Some(location) = &self.location {
            filters = filters.and(FilterExpr::eq("location", Value::String(location.clone())));
        }
        if let Some(price) = &self.price {
            filters.filters.extend(price.filters("price"));
        }
        if let Some(rooms) = &self.rooms {
            filters.filters.extend(rooms.filters("rooms"));
        }

        filters
    }

    pub fn to_find_query(&self) -> FindQuery {
        let query = FindQuery::new(self.filter()).page(self.skip(), self.limit);
        match &self.sort {
            Some(field) => query.sort(SortSpec::ascending(field.clone())),
            None => query,
        }
    }
}

/// Parsed `GET /hotels/aggregate` parameters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateQuery {
    pub location: Option<String>,
}

impl AggregateQuery {
    pub fn parse(params: &HashMap<String, String>) -> Self {
        Self {
            location: param(params, "location").map(str::to_string),
        }
    }
}

/// Parsed `GET /hotels/distinct` parameters
#[derive(Debug, Clone, PartialEq)]
pub struct DistinctQuery {
    pub field: String,
}

impl DistinctQuery {
    pub fn parse(params: &HashMap<String, String>) -> Self {
        Self {
            field: param(params, "field")
                .unwrap_or(DEFAULT_DISTINCT_FIELD)
                .to_string(),
        }
    }
}

/// Looks up a parameter, treating the empty string as absent
fn param<'a>(params: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    params.get(key).map(String::as_str).filter(|v| !v.is_empty())
}

/// Parse a page or limit parameter
fn parse_positive(name: &str, value: &str) -> RestResult<u64> {
    match value.trim().parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(RestError::InvalidQueryParam(format!(
            "{} must be a positive integer: '{}'",
            name, value
        ))),
    }
}
