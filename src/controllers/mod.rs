pub mod seats;
pub mod bookings;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .merge(seats::routes())
        .merge(bookings::routes())
}

/// Полный роутер приложения: API, health-check и, если задан `STATIC_DIR`, собранный клиент.
pub fn app(state: Arc<AppState>) -> Router {
    let static_dir = state.config.app.static_dir.clone();

    let router = Router::new()
        .route("/health", get(|| async { "OK" }))
        .nest("/api", routes())
        .with_state(state);

    let router = match static_dir {
        Some(dir) => {
            let index = ServeFile::new(format!("{}/index.html", dir));
            router.fallback_service(ServeDir::new(dir).fallback(index))
        }
        None => router.route("/", get(|| async { "Train Booking API v1.0" })),
    };

    router
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
