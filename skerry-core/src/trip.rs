use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::BookingError;

/// A scheduled departure with a fixed seat ceiling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trip {
    pub id: Uuid,
    pub date: NaiveDate,
    pub departure_time: NaiveTime,
    pub departure_location: String,
    pub max_capacity: i32,
}

/// A trip together with its current seat usage, as shown to customers.
///
/// `spots_left` is advisory only: the authoritative capacity check happens
/// inside the booking transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripAvailability {
    #[serde(flatten)]
    pub trip: Trip,
    pub booked: i64,
    pub spots_left: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewTrip {
    pub date: NaiveDate,
    pub departure_time: NaiveTime,
    pub departure_location: String,
    pub max_capacity: i32,
}

impl NewTrip {
    /// Fail-fast validation, run before the store is touched.
    ///
    /// The set of departure locations is configuration, not a structural
    /// constant: new ports are a config edit.
    pub fn validate(&self, allowed_locations: &[String]) -> Result<(), BookingError> {
        if self.max_capacity <= 0 {
            return Err(BookingError::InvalidInput(format!(
                "max_capacity must be positive, got {}",
                self.max_capacity
            )));
        }
        if !allowed_locations
            .iter()
            .any(|l| l == &self.departure_location)
        {
            return Err(BookingError::InvalidInput(format!(
                "Unknown departure location: {}",
                self.departure_location
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ports() -> Vec<String> {
        vec!["A".to_string(), "B".to_string()]
    }

    fn trip(location: &str, max_capacity: i32) -> NewTrip {
        NewTrip {
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            departure_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            departure_location: location.to_string(),
            max_capacity,
        }
    }

    #[test]
    fn known_location_and_positive_capacity_pass() {
        assert!(trip("A", 10).validate(&ports()).is_ok());
        assert!(trip("B", 1).validate(&ports()).is_ok());
    }

    #[test]
    fn unknown_location_is_rejected() {
        let err = trip("C", 10).validate(&ports()).unwrap_err();
        assert!(matches!(err, BookingError::InvalidInput(_)));
    }

    #[test]
    fn non_positive_capacity_is_rejected() {
        assert!(trip("A", 0).validate(&ports()).is_err());
        assert!(trip("A", -5).validate(&ports()).is_err());
    }
}
