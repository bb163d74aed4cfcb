//! # Hotel Routes
//!
//! | Method | Path                | Handler            |
//! |--------|---------------------|--------------------|
//! | POST   | `/hotels`           | `create_hotel`     |
//! | GET    | `/hotels`           | `list_hotels`      |
//! | GET    | `/hotels/aggregate` | `aggregate_hotels` |
//! | GET    | `/hotels/distinct`  | `distinct_values`  |

use std::sync::Arc;

use axum::routing::get;
use axum::Router;

use crate::store::HotelStore;

use super::handler::{aggregate_hotels, create_hotel, distinct_values, list_hotels};

/// State shared by the hotel handlers
#[derive(Clone)]
pub struct HotelState {
    pub store: Arc<dyn HotelStore>,
}

impl HotelState {
    pub fn new(store: Arc<dyn HotelStore>) -> Self {
        Self { store }
    }
}

/// Create hotel routes
pub fn hotel_routes(state: HotelState) -> Router {
    Router::new()
        .route("/hotels", get(list_hotels).post(create_hotel))
        .route("/hotels/aggregate", get(aggregate_hotels))
        .route("/hotels/distinct", get(distinct_values))
        .with_state(state)
}
