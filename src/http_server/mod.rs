//! # HTTP Server Module
//!
//! Serves the hotel API over HTTP.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/hotels` - Create and list hotels
//! - `/hotels/aggregate` - Per-location summary
//! - `/hotels/distinct` - Distinct field values

pub mod health;
pub mod server;

pub use server::HttpServer;
