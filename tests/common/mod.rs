#![allow(dead_code)]

use std::collections::BTreeSet;
use std::sync::Arc;

use train_booking::config::{AppConfig, BookingConfig, Config, DatabaseConfig, LogFormat};
use train_booking::database::Database;
use train_booking::services::BookingCoordinator;
use train_booking::AppState;

/// Coordinator over a fresh in-memory database with every seat free.
pub async fn empty_coach() -> BookingCoordinator {
    coach_with(BookingConfig {
        seed_on_init: false,
        ..BookingConfig::default()
    })
    .await
}

pub async fn coach_with(config: BookingConfig) -> BookingCoordinator {
    let db = Database::in_memory().await.expect("in-memory database");
    db.run_migrations().await.expect("migrations");

    let coordinator = BookingCoordinator::new(db, config);
    coordinator.initialize().await.expect("initialize");
    coordinator
}

pub fn test_config() -> Config {
    Config {
        app: AppConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            rust_log: "train_booking=debug".to_string(),
            log_format: LogFormat::Pretty,
            static_dir: None,
        },
        database: DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            pool_size: 1,
        },
        booking: BookingConfig::default(),
    }
}

pub async fn app_state() -> Arc<AppState> {
    let db = Database::in_memory().await.expect("in-memory database");
    AppState::with_database(db, test_config())
        .await
        .expect("app state")
}

pub async fn booked_seats(coordinator: &BookingCoordinator) -> BTreeSet<i32> {
    coordinator
        .seats()
        .await
        .expect("seats")
        .into_iter()
        .filter(|s| s.is_booked)
        .map(|s| s.seat_number)
        .collect()
}
