//! # Hotel REST API Module
//!
//! HTTP endpoints for creating, listing, aggregating and inspecting hotels.

pub mod errors;
pub mod handler;
pub mod parser;
pub mod request;
pub mod response;
pub mod routes;

pub use errors::{ErrorResponse, RestError, RestResult};
pub use parser::{AggregateQuery, DistinctQuery, ListQuery, RangeParam};
pub use request::CreateHotelRequest;
pub use response::{LocationSummary, MessageResponse};
pub use routes::{hotel_routes, HotelState};
