use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;
use std::collections::HashMap;
use std::env;

use crate::state::AppState;

#[derive(Serialize)]
struct HealthStatus {
    status: String,
    services: HashMap<String, ServiceStatus>,
    environment: String,
    version: String,
}

#[derive(Serialize, Clone)]
struct ServiceStatus {
    status: String,
    details: Option<String>,
}

impl ServiceStatus {
    fn ok(details: String) -> Self {
        Self {
            status: "ok".to_string(),
            details: Some(details),
        }
    }

    fn error(details: String) -> Self {
        Self {
            status: "error".to_string(),
            details: Some(details),
        }
    }
}

pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let (tours, destinations) = futures::join!(check_tours(&state), check_destinations(&state));

    let status = if tours.status == "ok" && destinations.status == "ok" {
        "ok"
    } else {
        "degraded"
    };

    let mut services = HashMap::new();
    services.insert("tours".to_string(), tours);
    services.insert("destinations".to_string(), destinations);

    HttpResponse::Ok().json(HealthStatus {
        status: status.to_string(),
        services,
        environment: env::var("RUST_ENV").unwrap_or("development".to_string()),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn check_tours(state: &AppState) -> ServiceStatus {
    match state.tours.try_all().await {
        Ok(tours) => ServiceStatus::ok(format!(
            "{} tours loaded from {}",
            tours.len(),
            state.tours.source()
        )),
        Err(e) => {
            log::error!("Tour source health check failed: {}", e);
            ServiceStatus::error(format!("Failed to load {}: {}", state.tours.source(), e))
        }
    }
}

async fn check_destinations(state: &AppState) -> ServiceStatus {
    match state.destinations.try_active().await {
        Ok(destinations) => ServiceStatus::ok(format!(
            "{} active destinations from {}",
            destinations.len(),
            state.destinations.source()
        )),
        Err(e) => {
            log::error!("Destination source health check failed: {}", e);
            ServiceStatus::error(format!(
                "Failed to load {}: {}",
                state.destinations.source(),
                e
            ))
        }
    }
}
