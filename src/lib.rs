pub mod config;
pub mod database;
pub mod error;
pub mod models;
pub mod services;
pub mod controllers;

use std::sync::Arc;
use tracing::info;

use crate::error::BookingError;
use crate::services::BookingCoordinator;

// Shared state для всего приложения
#[derive(Clone)]
pub struct AppState {
    pub db: database::Database,
    pub coordinator: BookingCoordinator,
    pub config: config::Config,
}

impl AppState {
    pub async fn new(config: config::Config) -> Result<Arc<Self>, BookingError> {
        let db = database::Database::new(&config.database.url, config.database.pool_size).await?;
        info!("Database connected");
        Self::with_database(db, config).await
    }

    /// Миграции и первичная инициализация мест; должно завершиться до приёма запросов.
    pub async fn with_database(
        db: database::Database,
        config: config::Config,
    ) -> Result<Arc<Self>, BookingError> {
        db.run_migrations().await?;

        let coordinator = BookingCoordinator::new(db.clone(), config.booking.clone());
        if coordinator.initialize().await? {
            info!("Seat map created");
        }

        Ok(Arc::new(Self {
            db,
            coordinator,
            config,
        }))
    }
}
