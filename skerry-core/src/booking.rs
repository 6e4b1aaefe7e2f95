use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::BookingError;

/// A reservation of seats on a trip. Never updated in place: bookings are
/// created, then either cancelled by the owning phone or removed when their
/// trip is deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub trip_id: Uuid,
    pub name: String,
    pub phone: String,
    pub num_people: i32,
    pub created_at: DateTime<Utc>,
}

/// A booking joined to its owning trip, denormalized for customer lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingWithTrip {
    pub id: Uuid,
    pub trip_id: Uuid,
    pub name: String,
    pub phone: String,
    pub num_people: i32,
    pub created_at: DateTime<Utc>,
    pub trip_date: NaiveDate,
    pub departure_time: NaiveTime,
    pub departure_location: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewBooking {
    pub trip_id: Uuid,
    pub name: String,
    pub phone: String,
    pub num_people: i32,
}

impl NewBooking {
    pub fn validate(&self) -> Result<(), BookingError> {
        if self.num_people <= 0 {
            return Err(BookingError::InvalidInput(format!(
                "num_people must be positive, got {}",
                self.num_people
            )));
        }
        if self.name.trim().is_empty() {
            return Err(BookingError::InvalidInput("name must not be empty".into()));
        }
        if self.phone.trim().is_empty() {
            return Err(BookingError::InvalidInput("phone must not be empty".into()));
        }
        Ok(())
    }
}
