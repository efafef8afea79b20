use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use crate::error::BookingError;
use crate::AppState;

/// Upper bound for `GET /api/bookings?limit=`.
const MAX_HISTORY_PAGE: i64 = 100;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/book", post(book_seats))
        .route("/bookings", get(get_bookings))
        .route("/reset", post(reset_all))
}

/* ---------- BOOK ---------- */

// POST /api/book
#[derive(Debug, Deserialize, Validate)]
struct BookRequest {
    #[serde(default)]
    #[validate(range(min = 1, max = 7))]
    seats_count: i64,
}

#[derive(Debug, Serialize)]
struct BookResponse {
    success: bool,
    booking_id: String,
    seat_numbers: Vec<i32>,
    message: String,
}

async fn book_seats(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<BookRequest>, JsonRejection>,
) -> Result<impl IntoResponse, BookingError> {
    // Кривое тело запроса - та же ошибка, что и неверное количество мест
    let Json(req) = payload.map_err(|e| {
        tracing::debug!("book request rejected: {}", e);
        BookingError::InvalidRequest { requested: 0 }
    })?;
    req.validate().map_err(|_| BookingError::InvalidRequest {
        requested: req.seats_count,
    })?;

    let confirmation = state.coordinator.book(req.seats_count).await?;
    let count = confirmation.seat_numbers.len();

    Ok((
        StatusCode::OK,
        Json(BookResponse {
            success: true,
            booking_id: confirmation.booking_id,
            seat_numbers: confirmation.seat_numbers,
            message: format!("Successfully booked {} seat(s)", count),
        }),
    ))
}

/* ---------- HISTORY ---------- */

#[derive(Debug, Deserialize)]
struct BookingsQuery {
    limit: Option<i64>,
}

// GET /api/bookings
async fn get_bookings(
    State(state): State<Arc<AppState>>,
    Query(params): Query<BookingsQuery>,
) -> Result<impl IntoResponse, BookingError> {
    let limit = params.limit.map(|l| l.clamp(1, MAX_HISTORY_PAGE));
    let bookings = state.coordinator.bookings(limit).await?;
    Ok((StatusCode::OK, Json(bookings)))
}

/* ---------- RESET ---------- */

// POST /api/reset
async fn reset_all(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, BookingError> {
    let report = state.coordinator.reset().await?;

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({
            "message": "Database reset successfully",
            "seats_released": report.seats_released,
            "bookings_deleted": report.bookings_deleted,
            "seeded": report.seeded,
        })),
    ))
}
