//! hotel-api - REST API for hotel listings
//!
//! Create hotels, list them with filters and pagination, summarize them by
//! location and inspect distinct field values.

pub mod cli;
pub mod config;
pub mod http_server;
pub mod logging;
pub mod model;
pub mod rest_api;
pub mod store;
