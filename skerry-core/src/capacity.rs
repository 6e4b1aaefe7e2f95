//! The capacity invariant, as pure arithmetic: for every trip, the sum of
//! `num_people` across its bookings never exceeds `max_capacity`. The store
//! runs this check inside a transaction that holds the trip row locked, so
//! the decision is never based on a stale total.

use crate::error::BookingError;

/// Admit or reject a booking of `requested` seats against a trip with
/// `max_capacity` total seats of which `booked` are already taken.
pub fn admit(max_capacity: i32, booked: i64, requested: i32) -> Result<(), BookingError> {
    let available = i64::from(max_capacity) - booked;
    if i64::from(requested) > available {
        return Err(BookingError::CapacityExceeded {
            requested,
            available,
        });
    }
    Ok(())
}

/// Seats still open on a trip. Clamped at zero for display.
pub fn spots_left(max_capacity: i32, booked: i64) -> i64 {
    (i64::from(max_capacity) - booked).max(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_trip_admits_up_to_capacity() {
        assert!(admit(10, 0, 10).is_ok());
        assert!(admit(10, 0, 1).is_ok());
        assert!(admit(10, 0, 11).is_err());
    }

    #[test]
    fn ten_seat_scenario() {
        // 7 seats fit, leaving 3.
        assert!(admit(10, 0, 7).is_ok());
        assert_eq!(spots_left(10, 7), 3);

        // 5 into 3 remaining must be rejected with the exact counts.
        match admit(10, 7, 5) {
            Err(BookingError::CapacityExceeded {
                requested,
                available,
            }) => {
                assert_eq!(requested, 5);
                assert_eq!(available, 3);
            }
            other => panic!("expected CapacityExceeded, got {:?}", other),
        }

        // 3 into 3 fills the trip exactly.
        assert!(admit(10, 7, 3).is_ok());
        assert_eq!(spots_left(10, 10), 0);
    }

    #[test]
    fn full_trip_rejects_a_single_seat() {
        assert!(admit(10, 10, 1).is_err());
    }
}
