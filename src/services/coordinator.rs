//! coordinator.rs
//!
//! Координатор транзакций бронирования - единственный, кто пишет в таблицы
//! `seats` и `bookings`.
//!
//! Ключевые операции:
//! 1.  **book**: выбор мест, пометка их занятыми и запись в журнал броней одной
//!     SQL-транзакцией. Любая ошибка откатывает всё целиком.
//! 2.  **reset**: очистка мест и журнала (одна транзакция), затем повторная
//!     посадка начальных броней. Сбой отдельной начальной брони не валит reset.
//!
//! `book` и `reset` сериализуются общим асинхронным мьютексом, так что
//! последовательность "прочитать - выбрать - записать" никогда не перемежается.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::SqliteConnection;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::config::BookingConfig;
use crate::database::Database;
use crate::error::BookingError;
use crate::models::{Booking, Confirmation, Seat};
use crate::services::allocation::{allocate, validate_request};
use crate::services::{Ledger, SeatMap};

/// Отчёт о сбросе состояния вагона.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResetReport {
    pub seats_released: u64,
    pub bookings_deleted: u64,
    /// Начальные брони, которые удалось посадить.
    pub seeded: Vec<i32>,
}

#[derive(Clone)]
pub struct BookingCoordinator {
    db: Database,
    seats: SeatMap,
    ledger: Ledger,
    config: BookingConfig,
    writer: Arc<Mutex<()>>,
}

impl BookingCoordinator {
    pub fn new(db: Database, config: BookingConfig) -> Self {
        Self {
            seats: SeatMap::new(db.clone()),
            ledger: Ledger::new(db.clone()),
            db,
            config,
            writer: Arc::new(Mutex::new(())),
        }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn seat_map(&self) -> &SeatMap {
        &self.seats
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Создаёт места при первом запуске. На свежей базе сразу сажает начальные брони.
    pub async fn initialize(&self) -> Result<bool, BookingError> {
        let _guard = self.writer.lock().await;

        let created = self.seats.initialize().await?;
        if created && self.config.seed_on_init {
            let seeded = self.seed(Utc::now()).await;
            info!("Initial seats booked: {:?}", seeded);
        }
        Ok(created)
    }

    /// Бронирует `requested` мест одной транзакцией.
    pub async fn book(&self, requested: i64) -> Result<Confirmation, BookingError> {
        let requested = validate_request(requested)?;

        let _guard = self.writer.lock().await;
        let mut tx = self.db.pool.begin().await?;

        match Self::book_in(&mut tx, requested).await {
            Ok(confirmation) => {
                tx.commit().await?;
                info!(
                    "Booking {} confirmed: seats {:?}",
                    confirmation.booking_id, confirmation.seat_numbers
                );
                Ok(confirmation)
            }
            Err(e) => {
                if let Err(rollback_err) = tx.rollback().await {
                    error!("failed to roll back booking of {} seats: {:?}", requested, rollback_err);
                }
                if e.is_client_error() {
                    info!("Booking of {} seats rejected: {}", requested, e);
                } else {
                    error!("Booking of {} seats aborted: {:?}", requested, e);
                }
                Err(e)
            }
        }
    }

    async fn book_in(
        conn: &mut SqliteConnection,
        requested: usize,
    ) -> Result<Confirmation, BookingError> {
        let free = SeatMap::free_in(&mut *conn).await?;
        let allocation = allocate(&free, requested)?;
        debug!(
            "Allocated {:?} via {:?} ({} seats were free)",
            allocation.seat_numbers,
            allocation.strategy,
            free.len()
        );

        let booking_id = new_booking_id();
        let created_at = Utc::now();

        SeatMap::mark_booked(&mut *conn, &allocation.seat_numbers, &booking_id, created_at).await?;
        Ledger::append(&mut *conn, &booking_id, &allocation.seat_numbers, created_at).await?;

        Ok(Confirmation {
            booking_id,
            seat_numbers: allocation.seat_numbers,
            created_at,
        })
    }

    /// Полный сброс: все места свободны, журнал пуст, затем начальные брони.
    pub async fn reset(&self) -> Result<ResetReport, BookingError> {
        let _guard = self.writer.lock().await;
        warn!("🔴 RESET: clearing all bookings");

        let mut tx = self.db.pool.begin().await?;
        let seats_released = SeatMap::reset(&mut tx).await?;
        let bookings_deleted = Ledger::clear_all(&mut tx).await?;
        tx.commit().await?;

        info!(
            "RESET: {} seats released, {} bookings deleted",
            seats_released, bookings_deleted
        );

        let seeded = self.seed(Utc::now()).await;

        warn!("🟢 RESET: done, initial seats booked: {:?}", seeded);
        Ok(ResetReport {
            seats_released,
            bookings_deleted,
            seeded,
        })
    }

    pub async fn seats(&self) -> Result<Vec<Seat>, BookingError> {
        self.seats.list_all_ordered().await
    }

    /// История броней, новые сверху. Без лимита берётся значение из конфигурации.
    pub async fn bookings(&self, limit: Option<i64>) -> Result<Vec<Booking>, BookingError> {
        self.ledger
            .list_recent(limit.unwrap_or(self.config.bookings_limit))
            .await
    }

    // Вызывается под мьютексом писателя.
    async fn seed(&self, booked_at: DateTime<Utc>) -> Vec<i32> {
        let mut seeded = Vec::with_capacity(self.config.seed_seats.len());
        for &seat_number in &self.config.seed_seats {
            match self.seed_one(seat_number, booked_at).await {
                Ok(()) => seeded.push(seat_number),
                Err(e) => warn!("initial booking of seat {} skipped: {}", seat_number, e),
            }
        }
        seeded
    }

    async fn seed_one(&self, seat_number: i32, booked_at: DateTime<Utc>) -> Result<(), BookingError> {
        let mut tx = self.db.pool.begin().await?;
        SeatMap::mark_booked(&mut tx, &[seat_number], &seed_booking_id(seat_number), booked_at).await?;
        tx.commit().await?;
        Ok(())
    }
}

fn new_booking_id() -> String {
    format!("BOOK_{}", Uuid::new_v4().simple())
}

fn seed_booking_id(seat_number: i32) -> String {
    format!("INITIAL_{}", seat_number)
}
