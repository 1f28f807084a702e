use std::sync::Mutex;

use crate::{
    config::AppConfig,
    db::{
        booking_store::BookingStore,
        tour_store::{DestinationRepository, TourRepository},
    },
    services::rate_limiter::RateLimiter,
};

/// Everything the handlers share, built once at startup and handed to
/// actix through `web::Data`.
pub struct AppState {
    pub tours: TourRepository,
    pub destinations: DestinationRepository,
    pub bookings: BookingStore,
    pub booking_limiter: Mutex<RateLimiter>,
    pub debug: bool,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            tours: TourRepository::new(config.tours_source.clone(), config.api_timeout),
            destinations: DestinationRepository::new(
                config.destinations_source.clone(),
                config.api_timeout,
            ),
            bookings: BookingStore::new(&config.bookings_store_path),
            booking_limiter: Mutex::new(RateLimiter::new(
                config.booking_rate_limit,
                config.booking_rate_window,
            )),
            debug: config.debug,
        }
    }
}
