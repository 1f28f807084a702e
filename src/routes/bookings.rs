use actix_web::{web, HttpResponse, Responder};
use chrono::Utc;

use crate::{
    models::{
        bookings::{BookingRequest, QuoteRequest},
        tour::Tour,
    },
    services::{
        pricing_service::{PricingService, DEFAULT_ADULT_PRICE},
        tour_filter_service::find_tour,
        validation_service::validate_booking,
    },
    state::AppState,
};

enum TourLookup {
    Found(Tour),
    Unspecified,
    Missing(u32),
}

async fn lookup_tour(state: &AppState, tour_id: Option<u32>) -> TourLookup {
    let Some(id) = tour_id else {
        return TourLookup::Unspecified;
    };

    let all = state.tours.all().await;
    match find_tour(&all, id) {
        Some(tour) => TourLookup::Found(tour.clone()),
        None => TourLookup::Missing(id),
    }
}

fn tour_not_found(id: u32) -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": format!("Tour {} not found", id) }))
}

/*
    /api/bookings/quote
*/
pub async fn quote(state: web::Data<AppState>, input: web::Json<QuoteRequest>) -> impl Responder {
    let adult_price = match lookup_tour(&state, input.tour_id).await {
        TourLookup::Found(tour) => tour.price,
        TourLookup::Unspecified => DEFAULT_ADULT_PRICE,
        TourLookup::Missing(id) => return tour_not_found(id),
    };

    HttpResponse::Ok().json(PricingService::quote(
        adult_price,
        input.adults,
        input.children,
        input.promo_code.as_deref(),
    ))
}

/*
    /api/bookings
*/
pub async fn create(state: web::Data<AppState>, input: web::Json<BookingRequest>) -> impl Responder {
    let allowed = state
        .booking_limiter
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .attempt();
    if !allowed {
        log::warn!("Booking submission rate limit reached");
        return HttpResponse::TooManyRequests()
            .json(serde_json::json!({ "error": "Too many booking attempts, try again later" }));
    }

    let request = input.into_inner();
    if let Err(errors) = validate_booking(&request, Utc::now().date_naive()) {
        return HttpResponse::BadRequest().json(serde_json::json!({ "errors": errors }));
    }

    let (adult_price, tour_name) = match lookup_tour(&state, request.tour_id).await {
        TourLookup::Found(tour) => (tour.price, tour.title),
        TourLookup::Unspecified => (
            DEFAULT_ADULT_PRICE,
            request.tour_name.clone().unwrap_or_else(|| "Tour".to_string()),
        ),
        TourLookup::Missing(id) => return tour_not_found(id),
    };

    let pricing = PricingService::quote(
        adult_price,
        request.adults,
        request.children,
        request.promo_code.as_deref(),
    );
    if let Some(error) = &pricing.promo_error {
        log::info!("Booking continues without promo: {}", error);
    }

    match state.bookings.create_booking(&request, tour_name, pricing).await {
        Ok(booking) => HttpResponse::Created().json(booking),
        Err(err) => {
            log::error!("Failed to store booking: {}", err);
            HttpResponse::InternalServerError().body("Failed to create booking.")
        }
    }
}

/*
    /api/bookings/last
*/
pub async fn last(state: web::Data<AppState>) -> impl Responder {
    match state.bookings.last_booking().await {
        Ok(Some(booking)) => HttpResponse::Ok().json(booking),
        Ok(None) => HttpResponse::NotFound().json(serde_json::json!({ "error": "No bookings yet" })),
        Err(err) => {
            log::error!("Failed to read last booking: {}", err);
            HttpResponse::InternalServerError().body("Failed to read booking.")
        }
    }
}
