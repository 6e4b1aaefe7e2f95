use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use skerry_core::booking::{Booking, BookingWithTrip, NewBooking};
use skerry_core::capacity;
use skerry_core::error::BookingError;
use skerry_core::store::BookingStore;
use skerry_core::trip::{NewTrip, Trip, TripAvailability};

use crate::app_config::BookingConfig;

/// Postgres-backed booking store. Capacity enforcement rides on a row lock:
/// the check-and-insert transaction takes `FOR UPDATE` on the trip row, so
/// concurrent bookings against the same trip serialize and none can decide
/// on a stale total.
pub struct PgBookingStore {
    pool: PgPool,
    config: BookingConfig,
}

// Internal structs for type-safe querying
#[derive(sqlx::FromRow)]
struct TripRow {
    id: Uuid,
    date: NaiveDate,
    departure_time: NaiveTime,
    departure_location: String,
    max_capacity: i32,
}

#[derive(sqlx::FromRow)]
struct AvailabilityRow {
    id: Uuid,
    date: NaiveDate,
    departure_time: NaiveTime,
    departure_location: String,
    max_capacity: i32,
    booked: i64,
}

#[derive(sqlx::FromRow)]
struct BookingRow {
    id: Uuid,
    trip_id: Uuid,
    name: String,
    phone: String,
    num_people: i32,
    created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct BookingWithTripRow {
    id: Uuid,
    trip_id: Uuid,
    name: String,
    phone: String,
    num_people: i32,
    created_at: DateTime<Utc>,
    trip_date: NaiveDate,
    departure_time: NaiveTime,
    departure_location: String,
}

impl From<TripRow> for Trip {
    fn from(r: TripRow) -> Self {
        Trip {
            id: r.id,
            date: r.date,
            departure_time: r.departure_time,
            departure_location: r.departure_location,
            max_capacity: r.max_capacity,
        }
    }
}

impl From<BookingRow> for Booking {
    fn from(r: BookingRow) -> Self {
        Booking {
            id: r.id,
            trip_id: r.trip_id,
            name: r.name,
            phone: r.phone,
            num_people: r.num_people,
            created_at: r.created_at,
        }
    }
}

impl PgBookingStore {
    pub fn new(pool: PgPool, config: BookingConfig) -> Self {
        Self { pool, config }
    }

    /// One attempt at the locked check-and-insert. All-or-nothing: any
    /// failure rolls the transaction back with no partial row.
    async fn try_create_booking(&self, req: &NewBooking) -> Result<Booking, BookingError> {
        let mut tx = self.pool.begin().await.map_err(map_db_err)?;

        // Lock the trip row for the duration of the check-and-insert.
        let cap: Option<(i32,)> =
            sqlx::query_as("SELECT max_capacity FROM trips WHERE id = $1 FOR UPDATE")
                .bind(req.trip_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(map_db_err)?;

        let Some((max_capacity,)) = cap else {
            return Err(BookingError::TripNotFound(req.trip_id));
        };

        let (booked,): (i64,) =
            sqlx::query_as("SELECT COALESCE(SUM(num_people), 0) FROM bookings WHERE trip_id = $1")
                .bind(req.trip_id)
                .fetch_one(&mut *tx)
                .await
                .map_err(map_db_err)?;

        capacity::admit(max_capacity, booked, req.num_people)?;

        let booking = Booking {
            id: Uuid::new_v4(),
            trip_id: req.trip_id,
            name: req.name.clone(),
            phone: req.phone.clone(),
            num_people: req.num_people,
            created_at: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO bookings (id, trip_id, name, phone, num_people, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(booking.id)
        .bind(booking.trip_id)
        .bind(&booking.name)
        .bind(&booking.phone)
        .bind(booking.num_people)
        .bind(booking.created_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_err)?;

        tx.commit().await.map_err(map_db_err)?;

        Ok(booking)
    }
}

#[async_trait]
impl BookingStore for PgBookingStore {
    async fn create_booking(&self, req: NewBooking) -> Result<Booking, BookingError> {
        req.validate()?;

        let mut attempts = 0;
        loop {
            match self.try_create_booking(&req).await {
                Err(BookingError::ConcurrencyConflict) if attempts < self.config.max_retries => {
                    attempts += 1;
                    warn!(
                        trip_id = %req.trip_id,
                        attempt = attempts,
                        "Serialization conflict on booking insert, retrying"
                    );
                }
                Ok(booking) => {
                    info!(booking_id = %booking.id, trip_id = %booking.trip_id, seats = booking.num_people, "Booking created");
                    return Ok(booking);
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn cancel_booking(&self, booking_id: Uuid, phone: &str) -> Result<bool, BookingError> {
        // Single-statement delete: wrong id, wrong phone and already-gone
        // are indistinguishable by design.
        let result = sqlx::query("DELETE FROM bookings WHERE id = $1 AND phone = $2")
            .bind(booking_id)
            .bind(phone)
            .execute(&self.pool)
            .await
            .map_err(map_db_err)?;

        let cancelled = result.rows_affected() > 0;
        if cancelled {
            info!(%booking_id, "Booking cancelled");
        }
        Ok(cancelled)
    }

    async fn trips_with_availability(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<TripAvailability>, BookingError> {
        let rows: Vec<AvailabilityRow> = sqlx::query_as(
            r#"
            SELECT t.id, t.date, t.departure_time, t.departure_location, t.max_capacity,
                   COALESCE(SUM(b.num_people), 0) AS booked
            FROM trips t
            LEFT JOIN bookings b ON b.trip_id = t.id
            WHERE t.date = $1
            GROUP BY t.id
            ORDER BY t.departure_time
            "#,
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_err)?;

        Ok(rows
            .into_iter()
            .map(|r| {
                let spots_left = capacity::spots_left(r.max_capacity, r.booked);
                TripAvailability {
                    trip: Trip {
                        id: r.id,
                        date: r.date,
                        departure_time: r.departure_time,
                        departure_location: r.departure_location,
                        max_capacity: r.max_capacity,
                    },
                    booked: r.booked,
                    spots_left,
                }
            })
            .collect())
    }

    async fn bookings_for_phone(
        &self,
        phone: &str,
    ) -> Result<Vec<BookingWithTrip>, BookingError> {
        let rows: Vec<BookingWithTripRow> = sqlx::query_as(
            r#"
            SELECT b.id, b.trip_id, b.name, b.phone, b.num_people, b.created_at,
                   t.date AS trip_date, t.departure_time, t.departure_location
            FROM bookings b
            JOIN trips t ON t.id = b.trip_id
            WHERE b.phone = $1
            ORDER BY t.date, t.departure_time
            "#,
        )
        .bind(phone)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_err)?;

        Ok(rows
            .into_iter()
            .map(|r| BookingWithTrip {
                id: r.id,
                trip_id: r.trip_id,
                name: r.name,
                phone: r.phone,
                num_people: r.num_people,
                created_at: r.created_at,
                trip_date: r.trip_date,
                departure_time: r.departure_time,
                departure_location: r.departure_location,
            })
            .collect())
    }

    async fn create_trip(&self, req: NewTrip) -> Result<Trip, BookingError> {
        req.validate(&self.config.departure_locations)?;

        let trip = Trip {
            id: Uuid::new_v4(),
            date: req.date,
            departure_time: req.departure_time,
            departure_location: req.departure_location,
            max_capacity: req.max_capacity,
        };

        sqlx::query(
            r#"
            INSERT INTO trips (id, date, departure_time, departure_location, max_capacity)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(trip.id)
        .bind(trip.date)
        .bind(trip.departure_time)
        .bind(&trip.departure_location)
        .bind(trip.max_capacity)
        .execute(&self.pool)
        .await
        .map_err(map_db_err)?;

        info!(trip_id = %trip.id, date = %trip.date, "Trip created");
        Ok(trip)
    }

    async fn update_trip(&self, id: Uuid, req: NewTrip) -> Result<Trip, BookingError> {
        req.validate(&self.config.departure_locations)?;

        let mut tx = self.pool.begin().await.map_err(map_db_err)?;

        let existing: Option<(i32,)> =
            sqlx::query_as("SELECT max_capacity FROM trips WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(map_db_err)?;

        if existing.is_none() {
            return Err(BookingError::TripNotFound(id));
        }

        // Shrinking capacity below the booked total would break the
        // invariant for already-accepted bookings.
        let (booked,): (i64,) =
            sqlx::query_as("SELECT COALESCE(SUM(num_people), 0) FROM bookings WHERE trip_id = $1")
                .bind(id)
                .fetch_one(&mut *tx)
                .await
                .map_err(map_db_err)?;

        if booked > i64::from(req.max_capacity) {
            return Err(BookingError::InvalidInput(format!(
                "max_capacity {} is below the {} seats already booked",
                req.max_capacity, booked
            )));
        }

        sqlx::query(
            r#"
            UPDATE trips
            SET date = $2, departure_time = $3, departure_location = $4, max_capacity = $5
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(req.date)
        .bind(req.departure_time)
        .bind(&req.departure_location)
        .bind(req.max_capacity)
        .execute(&mut *tx)
        .await
        .map_err(map_db_err)?;

        tx.commit().await.map_err(map_db_err)?;

        Ok(Trip {
            id,
            date: req.date,
            departure_time: req.departure_time,
            departure_location: req.departure_location,
            max_capacity: req.max_capacity,
        })
    }

    async fn delete_trip(&self, id: Uuid) -> Result<bool, BookingError> {
        // Bookings go with the trip via ON DELETE CASCADE.
        let result = sqlx::query("DELETE FROM trips WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_err)?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            info!(trip_id = %id, "Trip deleted");
        }
        Ok(deleted)
    }

    async fn list_trips(&self) -> Result<Vec<Trip>, BookingError> {
        let rows: Vec<TripRow> = sqlx::query_as(
            r#"
            SELECT id, date, departure_time, departure_location, max_capacity
            FROM trips
            ORDER BY date, departure_time
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_err)?;

        Ok(rows.into_iter().map(Trip::from).collect())
    }

    async fn bookings_for_trip(&self, trip_id: Uuid) -> Result<Vec<Booking>, BookingError> {
        let rows: Vec<BookingRow> = sqlx::query_as(
            r#"
            SELECT id, trip_id, name, phone, num_people, created_at
            FROM bookings
            WHERE trip_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(trip_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_err)?;

        Ok(rows.into_iter().map(Booking::from).collect())
    }

    async fn delete_booking(&self, booking_id: Uuid) -> Result<bool, BookingError> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(booking_id)
            .execute(&self.pool)
            .await
            .map_err(map_db_err)?;

        Ok(result.rows_affected() > 0)
    }
}

/// Postgres reports serialization failures as 40001 and deadlocks as 40P01;
/// both are transient and safe to retry once the transaction has rolled back.
fn map_db_err(err: sqlx::Error) -> BookingError {
    if let sqlx::Error::Database(db_err) = &err {
        if matches!(db_err.code().as_deref(), Some("40001") | Some("40P01")) {
            return BookingError::ConcurrencyConflict;
        }
    }
    BookingError::Database(err)
}
