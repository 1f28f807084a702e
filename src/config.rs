use std::{env, str::FromStr, time::Duration};

use crate::db::tour_store::DataSource;

pub const HOST: &str = "0.0.0.0";
pub const PORT: u16 = 8080;
pub const TOURS_SOURCE: &str = "data/tours.json";
pub const DESTINATIONS_SOURCE: &str = "data/destinations.json";
pub const BOOKINGS_STORE_PATH: &str = "data/bookings.json";
pub const API_TIMEOUT_MS: u64 = 30_000;
pub const BOOKING_RATE_LIMIT: usize = 5;
pub const BOOKING_RATE_WINDOW_SECS: u64 = 60;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub tours_source: DataSource,
    pub destinations_source: DataSource,
    pub bookings_store_path: String,
    pub api_timeout: Duration,
    pub booking_rate_limit: usize,
    pub booking_rate_window: Duration,
    pub debug: bool,
}

fn var_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

fn flag(key: &str) -> bool {
    env::var(key)
        .map(|value| matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

impl AppConfig {
    /// Read settings from the environment; unset or unparseable values fall
    /// back to the defaults above.
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| HOST.to_string()),
            port: var_or("PORT", PORT),
            tours_source: DataSource::parse(
                &env::var("TOURS_SOURCE").unwrap_or_else(|_| TOURS_SOURCE.to_string()),
            ),
            destinations_source: DataSource::parse(
                &env::var("DESTINATIONS_SOURCE").unwrap_or_else(|_| DESTINATIONS_SOURCE.to_string()),
            ),
            bookings_store_path: env::var("BOOKINGS_STORE_PATH")
                .unwrap_or_else(|_| BOOKINGS_STORE_PATH.to_string()),
            api_timeout: Duration::from_millis(var_or("API_TIMEOUT_MS", API_TIMEOUT_MS)),
            booking_rate_limit: var_or("BOOKING_RATE_LIMIT", BOOKING_RATE_LIMIT),
            booking_rate_window: Duration::from_secs(var_or(
                "BOOKING_RATE_WINDOW_SECS",
                BOOKING_RATE_WINDOW_SECS,
            )),
            debug: flag("DEBUG"),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: HOST.to_string(),
            port: PORT,
            tours_source: DataSource::parse(TOURS_SOURCE),
            destinations_source: DataSource::parse(DESTINATIONS_SOURCE),
            bookings_store_path: BOOKINGS_STORE_PATH.to_string(),
            api_timeout: Duration::from_millis(API_TIMEOUT_MS),
            booking_rate_limit: BOOKING_RATE_LIMIT,
            booking_rate_window: Duration::from_secs(BOOKING_RATE_WINDOW_SECS),
            debug: false,
        }
    }
}
