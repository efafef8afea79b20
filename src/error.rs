use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BookingError {
    #[error("Seats count must be between 1 and 7")]
    InvalidRequest { requested: i64 },

    #[error("Not enough seats available")]
    InsufficientCapacity { requested: usize, available: usize },

    #[error("seat {0} does not exist or is already booked")]
    InvalidSeat(i32),

    #[error("booking id {0} already exists")]
    DuplicateBookingId(String),

    #[error("booking {booking_id} has unreadable seat numbers")]
    CorruptRecord {
        booking_id: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl BookingError {
    /// Errors caused by the request itself rather than by the service.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            BookingError::InvalidRequest { .. } | BookingError::InsufficientCapacity { .. }
        )
    }

    pub fn status_code(&self) -> StatusCode {
        if self.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for BookingError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = if self.is_client_error() {
            self.to_string()
        } else {
            tracing::error!("internal booking failure: {:?}", self);
            "Internal server error".to_string()
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}
