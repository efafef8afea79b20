//! seat_map.rs
//!
//! Хранилище мест вагона. Таблица `seats` создаётся один раз (80 записей),
//! дальше меняются только `is_booked`, `booking_id` и `booked_at`.
//!
//! Операции записи принимают соединение снаружи, чтобы координатор мог
//! собрать их в одну транзакцию вместе с записью в журнал броней.

use chrono::{DateTime, Utc};
use sqlx::{SqliteConnection, SqliteExecutor};
use tracing::info;

use crate::database::Database;
use crate::error::BookingError;
use crate::models::seat::{row_of, TOTAL_SEATS};
use crate::models::{Occupancy, Seat};

const SEAT_COLUMNS: &str = "seat_number, row_number, is_booked, booking_id, booked_at";

#[derive(Clone)]
pub struct SeatMap {
    db: Database,
}

impl SeatMap {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Создаёт места 1..=80, если таблица пуста. Возвращает `true`, если места были созданы.
    pub async fn initialize(&self) -> Result<bool, BookingError> {
        let mut tx = self.db.pool.begin().await?;

        let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM seats")
            .fetch_one(&mut *tx)
            .await?;
        if existing > 0 {
            return Ok(false);
        }

        info!("Initializing {} seats...", TOTAL_SEATS);
        for seat_number in 1..=TOTAL_SEATS {
            sqlx::query(
                "INSERT OR IGNORE INTO seats (seat_number, row_number, is_booked) VALUES (?, ?, 0)",
            )
            .bind(seat_number)
            .bind(row_of(seat_number))
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(true)
    }

    pub async fn list_all_ordered(&self) -> Result<Vec<Seat>, BookingError> {
        let seats = sqlx::query_as::<_, Seat>(&format!(
            "SELECT {SEAT_COLUMNS} FROM seats ORDER BY seat_number"
        ))
        .fetch_all(&self.db.pool)
        .await?;
        Ok(seats)
    }

    pub async fn list_free_ordered(&self) -> Result<Vec<Seat>, BookingError> {
        Self::free_in(&self.db.pool).await
    }

    pub async fn occupancy(&self) -> Result<Occupancy, BookingError> {
        let (total, booked): (i64, i64) =
            sqlx::query_as("SELECT COUNT(*), COALESCE(SUM(is_booked), 0) FROM seats")
                .fetch_one(&self.db.pool)
                .await?;
        Ok(Occupancy {
            total,
            booked,
            free: total - booked,
        })
    }

    /// Свободные места по возрастанию номера; внутри транзакции - для проверки свежести.
    pub async fn free_in<'e, E>(executor: E) -> Result<Vec<Seat>, BookingError>
    where
        E: SqliteExecutor<'e>,
    {
        let seats = sqlx::query_as::<_, Seat>(&format!(
            "SELECT {SEAT_COLUMNS} FROM seats WHERE is_booked = 0 ORDER BY seat_number"
        ))
        .fetch_all(executor)
        .await?;
        Ok(seats)
    }

    /// Помечает ровно эти места занятыми. Несуществующее или уже занятое место даёт
    /// `InvalidSeat`; откат остальных изменений - забота владельца транзакции.
    pub async fn mark_booked(
        conn: &mut SqliteConnection,
        seat_numbers: &[i32],
        booking_id: &str,
        booked_at: DateTime<Utc>,
    ) -> Result<(), BookingError> {
        for &seat_number in seat_numbers {
            let result = sqlx::query(
                r#"
                UPDATE seats
                SET is_booked = 1, booking_id = ?, booked_at = ?
                WHERE seat_number = ? AND is_booked = 0
                "#,
            )
            .bind(booking_id)
            .bind(booked_at)
            .bind(seat_number)
            .execute(&mut *conn)
            .await?;

            if result.rows_affected() != 1 {
                return Err(BookingError::InvalidSeat(seat_number));
            }
        }
        Ok(())
    }

    /// Освобождает все места. Возвращает количество освобождённых.
    pub async fn reset(conn: &mut SqliteConnection) -> Result<u64, BookingError> {
        let result = sqlx::query(
            r#"
            UPDATE seats
            SET is_booked = 0, booking_id = NULL, booked_at = NULL
            WHERE is_booked = 1
            "#,
        )
        .execute(&mut *conn)
        .await?;
        Ok(result.rows_affected())
    }
}
