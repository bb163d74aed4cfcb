//! # Response Formatting
//!
//! Response types for the hotel endpoints.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::store::StoreError;

use super::errors::RestResult;

/// Message returned after a successful create
pub const HOTEL_CREATED_MESSAGE: &str = "Hotel successfully added!";

/// Plain confirmation message
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn hotel_created() -> Self {
        Self::new(HOTEL_CREATED_MESSAGE)
    }
}

/// Per-location price and capacity summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationSummary {
    #[serde(rename = "locationId", alias = "_id")]
    pub location_id: String,

    #[serde(rename = "averagePrice")]
    pub average_price: f64,

    /// Exact integer total; a float once the total leaves the i64 range
    #[serde(rename = "totalRooms")]
    pub total_rooms: Number,
}

impl LocationSummary {
    /// Converts a grouped document (`_id`, `averagePrice`, `totalRooms`)
    pub fn from_group(document: Value) -> RestResult<Self> {
        serde_json::from_value(document).map_err(|e| StoreError::from(e).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_message_serialization() {
        let json = serde_json::to_value(MessageResponse::hotel_created()).unwrap();
        assert_eq!(json, json!({"message": "Hotel successfully added!"}));
    }

    #[test]
    fn test_summary_from_group() {
        let summary = LocationSummary::from_group(json!({
            "_id": "Paris",
            "averagePrice": 150.0,
            "totalRooms": 30
        }))
        .unwrap();

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(
            json,
            json!({"locationId": "Paris", "averagePrice": 150.0, "totalRooms": 30})
        );
    }

    #[test]
    fn test_summary_with_float_total() {
        let summary = LocationSummary::from_group(json!({
            "_id": "Paris",
            "averagePrice": 100.0,
            "totalRooms": 9.223372036854776e18
        }))
        .unwrap();

        assert_eq!(summary.total_rooms.as_i64(), None);
        assert_eq!(summary.total_rooms.as_f64(), Some(9.223372036854776e18));
    }

    #[test]
    fn test_summary_from_malformed_group() {
        assert!(LocationSummary::from_group(json!({"_id": null})).is_err());
    }
}
