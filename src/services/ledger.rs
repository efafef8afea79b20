//! ledger.rs
//!
//! Журнал подтверждённых броней (таблица `bookings`). Записи только добавляются;
//! удаляются целиком при сбросе.

use chrono::{DateTime, Utc};
use sqlx::SqliteConnection;

use crate::database::Database;
use crate::error::BookingError;
use crate::models::{Booking, BookingRow};

#[derive(Clone)]
pub struct Ledger {
    db: Database,
}

impl Ledger {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Добавляет подтверждённую бронь и возвращает её суррогатный id.
    pub async fn append(
        conn: &mut SqliteConnection,
        booking_id: &str,
        seat_numbers: &[i32],
        created_at: DateTime<Utc>,
    ) -> Result<i64, BookingError> {
        let encoded = serde_json::to_string(seat_numbers).map_err(|source| {
            BookingError::CorruptRecord {
                booking_id: booking_id.to_string(),
                source,
            }
        })?;

        let result = sqlx::query(
            "INSERT INTO bookings (booking_id, seats_count, seat_numbers, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(booking_id)
        .bind(seat_numbers.len() as i32)
        .bind(encoded)
        .bind(created_at)
        .execute(&mut *conn)
        .await
        .map_err(|e| match e.as_database_error() {
            Some(db_err) if db_err.is_unique_violation() => {
                BookingError::DuplicateBookingId(booking_id.to_string())
            }
            _ => BookingError::Storage(e),
        })?;

        Ok(result.last_insert_rowid())
    }

    /// Последние брони, новые сверху, не больше `limit`.
    pub async fn list_recent(&self, limit: i64) -> Result<Vec<Booking>, BookingError> {
        // отрицательный LIMIT в SQLite означает "без ограничения"
        let limit = limit.max(0);
        let rows = sqlx::query_as::<_, BookingRow>(
            r#"
            SELECT id, booking_id, seats_count, seat_numbers, created_at
            FROM bookings
            ORDER BY created_at DESC, id DESC
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(&self.db.pool)
        .await?;

        rows.into_iter().map(Booking::try_from).collect()
    }

    pub async fn count(&self) -> Result<i64, BookingError> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM bookings")
            .fetch_one(&self.db.pool)
            .await?;
        Ok(count)
    }

    pub async fn clear_all(conn: &mut SqliteConnection) -> Result<u64, BookingError> {
        let result = sqlx::query("DELETE FROM bookings")
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected())
    }
}
