//! Hotel validation
//!
//! Rules checked before any hotel is persisted:
//! - name is present and at least 3 characters long
//! - location is present
//! - price is a finite number, not negative
//! - rooms is at least 1
//!
//! Every violated field is reported, not just the first one.

use std::fmt;

use thiserror::Error;

use super::hotel::NewHotel;

/// Minimum number of characters in a hotel name
pub const MIN_NAME_LENGTH: usize = 3;

/// Minimum number of rooms
pub const MIN_ROOMS: i64 = 1;

/// A single failed constraint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    /// Field name as it appears on the wire
    pub field: &'static str,
    /// Human-readable reason
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }

    pub fn required(field: &'static str) -> Self {
        Self::new(field, format!("Path `{}` is required.", field))
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validation failure carrying every violated field, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Hotel validation failed: {}", join_violations(.violations))]
pub struct ValidationError {
    pub violations: Vec<FieldViolation>,
}

impl ValidationError {
    /// Returns the violation for a field, if any
    pub fn violation(&self, field: &str) -> Option<&FieldViolation> {
        self.violations.iter().find(|v| v.field == field)
    }
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Validates a hotel against the entity constraints.
///
/// # Errors
///
/// Returns `ValidationError` listing every field that violates its constraint.
pub fn validate_hotel(hotel: &NewHotel) -> Result<(), ValidationError> {
    let mut violations = Vec::new();

    if hotel.name.is_empty() {
        violations.push(FieldViolation::required("name"));
    } else if hotel.name.chars().count() < MIN_NAME_LENGTH {
        violations.push(FieldViolation::new(
            "name",
            "Hotel name must be at least 3 characters long",
        ));
    }

    if hotel.location.is_empty() {
        violations.push(FieldViolation::required("location"));
    }

    if !hotel.price.is_finite() || hotel.price < 0.0 {
        violations.push(FieldViolation::new("price", "Price must be a positive number"));
    }

    if hotel.rooms < MIN_ROOMS {
        violations.push(FieldViolation::new("rooms", "There must be at least one room"));
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { violations })
    }
}
