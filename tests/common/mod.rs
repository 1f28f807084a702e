#![allow(dead_code)]

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App};
use serde_json::json;
use std::time::Duration;
use tempfile::TempDir;

use tour_catalog_api::{
    config::AppConfig, db::tour_store::DataSource, routes, state::AppState,
};

pub struct TestApp {
    pub state: web::Data<AppState>,
    pub dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_rate_limit(100).await
    }

    pub async fn with_rate_limit(limit: usize) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let tours_path = dir.path().join("tours.json");
        let destinations_path = dir.path().join("destinations.json");

        std::fs::write(&tours_path, test_tours().to_string()).expect("Failed to write tours");
        std::fs::write(&destinations_path, test_destinations().to_string())
            .expect("Failed to write destinations");

        let config = AppConfig {
            tours_source: DataSource::File(tours_path),
            destinations_source: DataSource::File(destinations_path),
            bookings_store_path: dir.path().join("bookings.json").display().to_string(),
            api_timeout: Duration::from_secs(5),
            booking_rate_limit: limit,
            ..AppConfig::default()
        };

        Self {
            state: web::Data::new(AppState::new(&config)),
            dir,
        }
    }

    /// Points the tour source at a file that doesn't exist
    pub async fn with_missing_tours() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config = AppConfig {
            tours_source: DataSource::File(dir.path().join("missing.json")),
            destinations_source: DataSource::File(dir.path().join("missing-destinations.json")),
            bookings_store_path: dir.path().join("bookings.json").display().to_string(),
            ..AppConfig::default()
        };

        Self {
            state: web::Data::new(AppState::new(&config)),
            dir,
        }
    }

    pub fn create_app(&self) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(self.state.clone())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .configure(routes::configure)
    }
}

pub fn test_tours() -> serde_json::Value {
    json!([
        {
            "id": 1, "title": "Gobustan Tour", "type": "group", "price": 38,
            "description": "Petroglyphs and mud volcanoes", "duration": "6 часов",
            "destinations": ["gobustan"], "city": "Baku", "country": "Azerbaijan",
            "featured": true, "rating": 4.8, "reviewCount": 214, "tags": ["history"]
        },
        {
            "id": 2, "title": "Qabala Resort", "type": "package", "price": 49,
            "description": "Mountain lakes", "duration": "12 часов",
            "destinations": ["qabala"], "city": "Qabala", "country": "Azerbaijan",
            "featured": true, "rating": 4.6, "reviewCount": 158
        },
        {
            "id": 3, "title": "Old City Walk", "type": "private", "price": 25,
            "description": "Maiden Tower", "duration": "3 часа",
            "destinations": ["baku"], "city": "Baku", "country": "Azerbaijan",
            "rating": 4.9, "reviewCount": 402
        },
        {
            "id": 4, "title": "Sheki and Kish", "type": "group", "price": 120,
            "description": "Khan's palace", "duration": "2 дня / 1 ночь",
            "destinations": ["sheki"], "city": "Sheki", "country": "Azerbaijan",
            "rating": 4.7, "reviewCount": 133
        },
        {
            "id": 5, "title": "Tbilisi Weekend", "type": "package", "price": 260,
            "description": "Sulphur baths", "duration": "3 дня / 2 ночи",
            "destinations": ["tbilisi"], "city": "Tbilisi", "country": "Georgia",
            "rating": 4.4, "reviewCount": 64
        }
    ])
}

pub fn test_destinations() -> serde_json::Value {
    json!([
        {"id": 1, "name": "Baku", "country": "Azerbaijan", "status": "active"},
        {"id": 2, "name": "Naftalan", "country": "Azerbaijan", "status": "draft"},
        {"id": 3, "name": "Sheki", "country": "Azerbaijan", "status": "active"}
    ])
}

pub fn booking_payload() -> serde_json::Value {
    let date = (chrono::Utc::now().date_naive() + chrono::Duration::days(7)).to_string();
    json!({
        "tourId": 1,
        "date": date,
        "time": "10:00",
        "adults": 2,
        "children": 1,
        "customerName": "Leyla Aliyeva",
        "customerEmail": "leyla@example.com",
        "customerPhone": "+994 50 123 45 67",
        "promoCode": "SAVE20"
    })
}

pub fn review_payload() -> serde_json::Value {
    json!({
        "tourId": 1,
        "customerName": "Sarah Johnson",
        "rating": 5,
        "comment": "Amazing tour! The guide was excellent."
    })
}
