//! # Hotel Data Model
//!
//! The hotel entity and the constraints every persisted hotel satisfies.
//!
//! Validation lives here rather than in the store so that it can be
//! exercised without any backend.

pub mod hotel;
pub mod validation;

pub use hotel::{Hotel, NewHotel};
pub use validation::{validate_hotel, FieldViolation, ValidationError};
