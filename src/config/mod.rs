use serde::Deserialize;
use std::env;
use std::str::FromStr;
use thiserror::Error;

// Главная структура конфигурации - контейнер для всех настроек
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub booking: BookingConfig,
}

// Настройки приложения
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub rust_log: String,
    pub log_format: LogFormat,
    /// Directory with the pre-built client, served for non-API routes.
    pub static_dir: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

// Настройки базы данных
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub pool_size: u32,
}

// Настройки бронирования
#[derive(Debug, Clone, Deserialize)]
pub struct BookingConfig {
    /// Seats occupied after every reset (and on first start when `seed_on_init`).
    pub seed_seats: Vec<i32>,
    pub seed_on_init: bool,
    /// Default page size for the booking history.
    pub bookings_limit: i64,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} has an invalid value {value:?}")]
    Invalid { name: &'static str, value: String },
}

pub const DEFAULT_SEED_SEATS: [i32; 6] = [5, 12, 23, 45, 67, 78];

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            seed_seats: DEFAULT_SEED_SEATS.to_vec(),
            seed_on_init: true,
            bookings_limit: 10,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Config {
            app: AppConfig {
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_var("PORT", "5000")?,
                rust_log: env::var("RUST_LOG")
                    .unwrap_or_else(|_| "train_booking=debug,tower_http=debug".to_string()),
                log_format: match env::var("LOG_FORMAT").as_deref() {
                    Ok("json") => LogFormat::Json,
                    Ok("pretty") | Err(_) => LogFormat::Pretty,
                    Ok(other) => {
                        return Err(ConfigError::Invalid {
                            name: "LOG_FORMAT",
                            value: other.to_string(),
                        })
                    }
                },
                static_dir: env::var("STATIC_DIR").ok().filter(|d| !d.is_empty()),
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL")
                    .unwrap_or_else(|_| "sqlite://train_booking.db".to_string()),
                pool_size: parse_var("DB_POOL_SIZE", "5")?,
            },
            booking: BookingConfig {
                seed_seats: match env::var("SEED_SEATS") {
                    Ok(raw) => parse_seat_list(&raw)?,
                    Err(_) => DEFAULT_SEED_SEATS.to_vec(),
                },
                seed_on_init: parse_var("SEED_ON_INIT", "true")?,
                bookings_limit: parse_var("BOOKINGS_LIMIT", "10")?,
            },
        })
    }
}

fn parse_var<T: FromStr>(name: &'static str, default: &str) -> Result<T, ConfigError> {
    let value = env::var(name).unwrap_or_else(|_| default.to_string());
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { name, value })
}

/// Parses a comma separated list like `5,12,23`. Blank entries are ignored.
pub fn parse_seat_list(raw: &str) -> Result<Vec<i32>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i32>().map_err(|_| ConfigError::Invalid {
                name: "SEED_SEATS",
                value: raw.to_string(),
            })
        })
        .collect()
}
