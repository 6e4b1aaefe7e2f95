use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::booking::{Booking, BookingWithTrip, NewBooking};
use crate::error::BookingError;
use crate::trip::{NewTrip, Trip, TripAvailability};

/// The seam between the HTTP layer and the store. The store implementation
/// owns all coordination: callers see an atomic check-and-insert.
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// The sole write path for bookings. Atomically checks the capacity
    /// invariant and inserts; no partial row is ever visible.
    async fn create_booking(&self, req: NewBooking) -> Result<Booking, BookingError>;

    /// Deletes the booking only when its stored phone matches. Returns
    /// whether a row was removed; `false` covers wrong id, wrong phone and
    /// already-cancelled alike, so callers cannot probe other customers'
    /// bookings.
    async fn cancel_booking(&self, booking_id: Uuid, phone: &str) -> Result<bool, BookingError>;

    /// Trips on the given date with their booked totals, ordered by
    /// departure time.
    async fn trips_with_availability(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<TripAvailability>, BookingError>;

    /// All bookings held by a phone number, joined to their trips, ordered
    /// by trip date then departure time.
    async fn bookings_for_phone(&self, phone: &str)
        -> Result<Vec<BookingWithTrip>, BookingError>;

    async fn create_trip(&self, req: NewTrip) -> Result<Trip, BookingError>;

    async fn update_trip(&self, id: Uuid, req: NewTrip) -> Result<Trip, BookingError>;

    /// Deletes a trip; its bookings go with it (cascade).
    async fn delete_trip(&self, id: Uuid) -> Result<bool, BookingError>;

    async fn list_trips(&self) -> Result<Vec<Trip>, BookingError>;

    /// Raw booking rows for a trip, admin only.
    async fn bookings_for_trip(&self, trip_id: Uuid) -> Result<Vec<Booking>, BookingError>;

    /// Raw delete without the phone check, admin only.
    async fn delete_booking(&self, booking_id: Uuid) -> Result<bool, BookingError>;
}
