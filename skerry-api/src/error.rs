use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use skerry_core::BookingError;

#[derive(Debug)]
pub enum AppError {
    AuthenticationError(String),
    AuthorizationError(String),
    ValidationError(String),
    NotFoundError(String),
    ConflictError(String),
    UnavailableError(String),
    Anyhow(anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::AuthenticationError(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::AuthorizationError(msg) => (StatusCode::FORBIDDEN, msg),
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFoundError(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::ConflictError(msg) => (StatusCode::CONFLICT, msg),
            AppError::UnavailableError(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
            AppError::Anyhow(err) => {
                tracing::error!("Internal Server Error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::InvalidInput(_) => AppError::ValidationError(err.to_string()),
            BookingError::TripNotFound(_) | BookingError::BookingNotFound(_) => {
                AppError::NotFoundError(err.to_string())
            }
            // User-facing: reported verbatim, seat counts included.
            BookingError::CapacityExceeded { .. } => AppError::ConflictError(err.to_string()),
            BookingError::ConcurrencyConflict => AppError::UnavailableError(err.to_string()),
            BookingError::Database(e) => AppError::Anyhow(e.into()),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::Anyhow(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn status_of(err: BookingError) -> StatusCode {
        AppError::from(err).into_response().status()
    }

    #[test]
    fn booking_errors_map_to_expected_statuses() {
        assert_eq!(
            status_of(BookingError::InvalidInput("bad".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(BookingError::TripNotFound(Uuid::new_v4())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(BookingError::CapacityExceeded {
                requested: 5,
                available: 3
            }),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(BookingError::ConcurrencyConflict),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn capacity_message_keeps_the_seat_counts() {
        let err = BookingError::CapacityExceeded {
            requested: 5,
            available: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains("requested 5"));
        assert!(msg.contains("3 available"));
    }
}
