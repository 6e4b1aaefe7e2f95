use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;

use skerry_core::{Trip, TripAvailability};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub date: NaiveDate,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/trips", get(list_trips))
        .route("/v1/trips/availability", get(trips_with_availability))
}

/// GET /v1/trips
async fn list_trips(State(state): State<AppState>) -> Result<Json<Vec<Trip>>, AppError> {
    let trips = state.store.list_trips().await?;
    Ok(Json(trips))
}

/// GET /v1/trips/availability?date=2024-06-01
async fn trips_with_availability(
    State(state): State<AppState>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<Vec<TripAvailability>>, AppError> {
    let trips = state.store.trips_with_availability(query.date).await?;
    Ok(Json(trips))
}
