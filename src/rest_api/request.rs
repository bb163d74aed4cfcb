//! # Request Bodies
//!
//! Every field is optional at the decoding step so that a missing field is
//! answered with the same message as a blank one.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Number;

use crate::model::NewHotel;

use super::errors::{RestError, RestResult};

/// Body of `POST /hotels`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateHotelRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "integral_number")]
    pub rooms: Option<i64>,
}

/// Accepts `40` and `40.0` alike; rejects fractional or out-of-range numbers.
fn integral_number<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(number) = Option::<Number>::deserialize(deserializer)? else {
        return Ok(None);
    };

    if let Some(n) = number.as_i64() {
        return Ok(Some(n));
    }

    match number.as_f64() {
        Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
            Ok(Some(f as i64))
        }
        _ => Err(D::Error::custom(format!(
            "invalid value: {}, expected an integer",
            number
        ))),
    }
}

impl CreateHotelRequest {
    /// Checks presence of every field.
    ///
    /// Rejects absent fields, `name`/`location` that are blank after
    /// trimming, and a zero `price` or `rooms`. Range constraints are left
    /// to store validation.
    pub fn into_new_hotel(self) -> RestResult<NewHotel> {
        let (Some(name), Some(location), Some(price), Some(rooms)) =
            (self.name, self.location, self.price, self.rooms)
        else {
            return Err(RestError::InvalidInput);
        };

        if name.trim().is_empty() || location.trim().is_empty() || price == 0.0 || rooms == 0 {
            return Err(RestError::InvalidInput);
        }

        Ok(NewHotel {
            name,
            location,
            price,
            rooms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(value: serde_json::Value) -> CreateHotelRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_complete_request() {
        let hotel = request(json!({"name": "Grand Inn", "location": "Paris", "price": 120, "rooms": 40}))
            .into_new_hotel()
            .unwrap();

        assert_eq!(hotel, NewHotel::new("Grand Inn", "Paris", 120.0, 40));
    }

    #[test]
    fn test_missing_fields() {
        for body in [
            json!({"location": "Paris", "price": 120, "rooms": 40}),
            json!({"name": "Grand Inn", "price": 120, "rooms": 40}),
            json!({"name": "Grand Inn", "location": "Paris", "rooms": 40}),
            json!({"name": "Grand Inn", "location": "Paris", "price": 120}),
            json!({"name": null, "location": "Paris", "price": 120, "rooms": 40}),
            json!({}),
        ] {
            assert!(matches!(
                request(body).into_new_hotel(),
                Err(RestError::InvalidInput)
            ));
        }
    }

    #[test]
    fn test_blank_and_zero_fields() {
        for body in [
            json!({"name": "   ", "location": "Paris", "price": 120, "rooms": 40}),
            json!({"name": "Grand Inn", "location": "\t", "price": 120, "rooms": 40}),
            json!({"name": "Grand Inn", "location": "Paris", "price": 0, "rooms": 40}),
            json!({"name": "Grand Inn", "location": "Paris", "price": 120, "rooms": 0}),
        ] {
            assert!(matches!(
                request(body).into_new_hotel(),
                Err(RestError::InvalidInput)
            ));
        }
    }

    #[test]
    fn test_integral_float_rooms() {
        let hotel = request(json!({"name": "Grand Inn", "location": "Paris", "price": 120, "rooms": 40.0}))
            .into_new_hotel()
            .unwrap();
        assert_eq!(hotel.rooms, 40);
    }

    #[test]
    fn test_fractional_rooms_rejected() {
        for rooms in [json!(2.5), json!(1e300), json!(u64::MAX), json!("40")] {
            let body = json!({"name": "Grand Inn", "location": "Paris", "price": 120, "rooms": rooms});
            assert!(
                serde_json::from_value::<CreateHotelRequest>(body).is_err(),
                "rooms: {}",
                rooms
            );
        }
    }

    #[test]
    fn test_out_of_range_values_pass_through() {
        let hotel = request(json!({"name": "Grand Inn", "location": "Paris", "price": -10, "rooms": -2}))
            .into_new_hotel()
            .unwrap();

        assert_eq!(hotel.price, -10.0);
        assert_eq!(hotel.rooms, -2);
    }
}
