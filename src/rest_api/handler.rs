//! # REST API Handlers
//!
//! One handler per hotel endpoint. Each handler parses its input, makes a
//! single store call and shapes the response; nothing is retained between
//! requests.

use std::collections::HashMap;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value;

use crate::model::Hotel;
use crate::store::{FilterExpr, FilterSet, GroupSpec, SortSpec, Stage};

use super::errors::{RestError, RestResult};
use super::parser::{AggregateQuery, DistinctQuery, ListQuery};
use super::request::CreateHotelRequest;
use super::response::{LocationSummary, MessageResponse};
use super::routes::HotelState;

/// `POST /hotels`
pub async fn create_hotel(
    State(state): State<HotelState>,
    body: Result<Json<CreateHotelRequest>, JsonRejection>,
) -> RestResult<(StatusCode, Json<MessageResponse>)> {
    let Json(request) = body.map_err(|e| RestError::InvalidBody(e.body_text()))?;
    let new_hotel = request.into_new_hotel()?;

    let hotel = state.store.insert(new_hotel).await?;
    tracing::info!(id = %hotel.id, location = %hotel.location, "hotel created");

    Ok((StatusCode::CREATED, Json(MessageResponse::hotel_created())))
}

/// `GET /hotels`
pub async fn list_hotels(
    State(state): State<HotelState>,
    Query(params): Query<HashMap<String, String>>,
) -> RestResult<Json<Vec<Hotel>>> {
    let query = ListQuery::parse(&params)?;
    let hotels = state.store.find(&query.to_find_query()).await?;
    Ok(Json(hotels))
}

/// `GET /hotels/aggregate`
pub async fn aggregate_hotels(
    State(state): State<HotelState>,
    Query(params): Query<HashMap<String, String>>,
) -> RestResult<Json<Vec<LocationSummary>>> {
    let query = AggregateQuery::parse(&params);
    let groups = state.store.aggregate(&location_summary_pipeline(&query)).await?;

    let summaries = groups
        .into_iter()
        .map(LocationSummary::from_group)
        .collect::<RestResult<Vec<_>>>()?;
    Ok(Json(summaries))
}

/// `GET /hotels/distinct`
pub async fn distinct_values(
    State(state): State<HotelState>,
    Query(params): Query<HashMap<String, String>>,
) -> RestResult<Json<Vec<Value>>> {
    let query = DistinctQuery::parse(&params);
    let values = state.store.distinct(&query.field).await?;
    Ok(Json(values))
}

/// Optional location match, group by location, cheapest location first
pub fn location_summary_pipeline(query: &AggregateQuery) -> Vec<Stage> {
    let mut stages = Vec::with_capacity(3);

    if let Some(location) = &query.location {
        stages.push(Stage::Match(
            FilterSet::new().and(FilterExpr::eq("location", Value::String(location.clone()))),
        ));
    }

    stages.push(Stage::Group(
        GroupSpec::by("location")
            .avg("averagePrice", "price")
            .sum("totalRooms", "rooms"),
    ));
    stages.push(Stage::Sort(SortSpec::ascending("averagePrice")));

    stages
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_without_location() {
        let stages = location_summary_pipeline(&AggregateQuery::default());

        assert_eq!(stages.len(), 2);
        assert!(matches!(stages[0], Stage::Group(_)));
        assert_eq!(stages[1], Stage::Sort(SortSpec::ascending("averagePrice")));
    }

    #[test]
    fn test_pipeline_with_location() {
        let stages = location_summary_pipeline(&AggregateQuery {
            location: Some("Paris".to_string()),
        });

        assert_eq!(stages.len(), 3);
        assert!(matches!(stages[0], Stage::Match(_)));
    }
}
