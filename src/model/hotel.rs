//! Hotel entity definitions
//!
//! Documents are serialized with the keys clients see on the wire:
//! `_id`, `name`, `location`, `price`, `rooms`, `createdAt`, `updatedAt`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted hotel listing.
///
/// `id`, `created_at` and `updated_at` are assigned by the store and are
/// never taken from client input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    /// Store-assigned identity
    #[serde(rename = "_id")]
    pub id: Uuid,

    /// Display name (at least 3 characters)
    pub name: String,

    /// Location the hotel is grouped and filtered by
    pub location: String,

    /// Nightly price, never negative
    pub price: f64,

    /// Number of rooms, at least one
    pub rooms: i64,

    /// Set once on creation
    pub created_at: DateTime<Utc>,

    /// Set on creation; no mutation path exists yet
    pub updated_at: DateTime<Utc>,
}

/// Client-supplied fields of a hotel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewHotel {
    pub name: String,
    pub location: String,
    pub price: f64,
    pub rooms: i64,
}

impl NewHotel {
    pub fn new(name: impl Into<String>, location: impl Into<String>, price: f64, rooms: i64) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
            price,
            rooms,
        }
    }
}

impl Hotel {
    /// Stamps a new hotel with its identity and creation time.
    pub fn from_new(new: NewHotel, id: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: new.name,
            location: new.location,
            price: new.price,
            rooms: new.rooms,
            created_at: now,
            updated_at: now,
        }
    }
}
