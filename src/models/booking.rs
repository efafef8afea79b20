use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::BookingError;

/// Сырая строка `bookings`; `seat_numbers` - ещё не разобранный JSON-массив.
#[derive(Debug, Clone, FromRow)]
pub struct BookingRow {
    pub id: i64,
    pub booking_id: String,
    pub seats_count: i32,
    pub seat_numbers: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: i64,
    pub booking_id: String,
    pub seats_count: i32,
    /// Места в порядке выбора, не обязательно по возрастанию.
    pub seat_numbers: Vec<i32>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<BookingRow> for Booking {
    type Error = BookingError;

    fn try_from(row: BookingRow) -> Result<Self, Self::Error> {
        let seat_numbers: Vec<i32> = serde_json::from_str(&row.seat_numbers).map_err(|source| {
            BookingError::CorruptRecord {
                booking_id: row.booking_id.clone(),
                source,
            }
        })?;

        Ok(Booking {
            id: row.id,
            booking_id: row.booking_id,
            seats_count: row.seats_count,
            seat_numbers,
            created_at: row.created_at,
        })
    }
}

/// Результат успешного `book`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Confirmation {
    pub booking_id: String,
    pub seat_numbers: Vec<i32>,
    pub created_at: DateTime<Utc>,
}
