use axum::{
    extract::{Path, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use skerry_core::{Booking, NewTrip, Trip};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
struct DeleteResponse {
    deleted: bool,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/admin/trips", post(create_trip))
        .route("/v1/admin/trips/{id}", put(update_trip))
        .route("/v1/admin/trips/{id}", delete(delete_trip))
        .route("/v1/admin/trips/{id}/bookings", get(list_trip_bookings))
        .route("/v1/admin/bookings/{id}", delete(delete_booking))
}

/// POST /v1/admin/trips
async fn create_trip(
    State(state): State<AppState>,
    Json(req): Json<NewTrip>,
) -> Result<Json<Trip>, AppError> {
    let trip = state.store.create_trip(req).await?;
    info!(trip_id = %trip.id, "Trip created by admin");
    Ok(Json(trip))
}

/// PUT /v1/admin/trips/{id}
async fn update_trip(
    State(state): State<AppState>,
    Path(trip_id): Path<Uuid>,
    Json(req): Json<NewTrip>,
) -> Result<Json<Trip>, AppError> {
    let trip = state.store.update_trip(trip_id, req).await?;
    Ok(Json(trip))
}

/// DELETE /v1/admin/trips/{id} — cascades to the trip's bookings.
async fn delete_trip(
    State(state): State<AppState>,
    Path(trip_id): Path<Uuid>,
) -> Result<Json<DeleteResponse>, AppError> {
    let deleted = state.store.delete_trip(trip_id).await?;
    if !deleted {
        return Err(AppError::NotFoundError(format!(
            "Trip {trip_id} not found"
        )));
    }
    Ok(Json(DeleteResponse { deleted }))
}

/// GET /v1/admin/trips/{id}/bookings — raw booking rows.
async fn list_trip_bookings(
    State(state): State<AppState>,
    Path(trip_id): Path<Uuid>,
) -> Result<Json<Vec<Booking>>, AppError> {
    let bookings = state.store.bookings_for_trip(trip_id).await?;
    Ok(Json(bookings))
}

/// DELETE /v1/admin/bookings/{id} — raw delete, no phone check.
async fn delete_booking(
    State(state): State<AppState>,
    Path(booking_id): Path<Uuid>,
) -> Result<Json<DeleteResponse>, AppError> {
    let deleted = state.store.delete_booking(booking_id).await?;
    if !deleted {
        return Err(AppError::NotFoundError(format!(
            "Booking {booking_id} not found"
        )));
    }
    Ok(Json(DeleteResponse { deleted }))
}
