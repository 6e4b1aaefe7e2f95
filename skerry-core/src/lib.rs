pub mod booking;
pub mod capacity;
pub mod error;
pub mod store;
pub mod trip;

pub use booking::{Booking, BookingWithTrip, NewBooking};
pub use error::BookingError;
pub use store::BookingStore;
pub use trip::{NewTrip, Trip, TripAvailability};
