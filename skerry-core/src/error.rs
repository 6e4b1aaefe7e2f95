use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Trip {0} not found")]
    TripNotFound(Uuid),

    #[error("Booking {0} not found")]
    BookingNotFound(Uuid),

    #[error("Not enough seats left: requested {requested}, {available} available")]
    CapacityExceeded { requested: i32, available: i64 },

    #[error("The booking could not be completed due to concurrent activity, please try again")]
    ConcurrencyConflict,

    #[error("Database failure: {0}")]
    Database(#[from] sqlx::Error),
}
