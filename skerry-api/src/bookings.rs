use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use skerry_core::{Booking, BookingWithTrip, NewBooking};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct LookupQuery {
    phone: String,
}

#[derive(Debug, Deserialize)]
struct CancelRequest {
    phone: String,
}

#[derive(Debug, Serialize)]
struct CancelResponse {
    cancelled: bool,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/bookings", post(create_booking))
        .route("/v1/bookings/mine", get(my_bookings))
        .route("/v1/bookings/{id}", delete(cancel_booking))
}

/// POST /v1/bookings
async fn create_booking(
    State(state): State<AppState>,
    Json(req): Json<NewBooking>,
) -> Result<Json<Booking>, AppError> {
    let booking = state.store.create_booking(req).await?;
    info!(booking_id = %booking.id, "Booking confirmed");
    Ok(Json(booking))
}

/// GET /v1/bookings/mine?phone=%2B46700000000
async fn my_bookings(
    State(state): State<AppState>,
    Query(query): Query<LookupQuery>,
) -> Result<Json<Vec<BookingWithTrip>>, AppError> {
    let bookings = state.store.bookings_for_phone(&query.phone).await?;
    Ok(Json(bookings))
}

/// DELETE /v1/bookings/{id}
///
/// Responds 200 with `cancelled: false` when nothing matched: wrong phone
/// and already-cancelled are deliberately the same outcome.
async fn cancel_booking(
    State(state): State<AppState>,
    Path(booking_id): Path<Uuid>,
    Json(req): Json<CancelRequest>,
) -> Result<Json<CancelResponse>, AppError> {
    let cancelled = state.store.cancel_booking(booking_id, &req.phone).await?;
    Ok(Json(CancelResponse { cancelled }))
}
