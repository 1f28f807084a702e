use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use serde_with::{serde_as, NoneAsEmptyString};

use crate::{
    models::{bookings::BookingStatus, review::ReviewStatus},
    services::admin_service::{calculate_stats, filter_bookings, filter_reviews},
    state::AppState,
};

/// An empty `status` matches any status, as sent by a cleared select
#[serde_as]
#[derive(Debug, Deserialize)]
pub struct BookingFilterQuery {
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    status: Option<BookingStatus>,
    #[serde(default)]
    search: String,
}

#[serde_as]
#[derive(Debug, Deserialize)]
pub struct ReviewFilterQuery {
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    status: Option<ReviewStatus>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    rating: Option<u8>,
    #[serde(default)]
    search: String,
}

fn storage_error(err: impl std::fmt::Display) -> HttpResponse {
    log::error!("Failed to read admin data: {}", err);
    HttpResponse::InternalServerError().body("Failed to read stored data.")
}

/*
    /api/admin/bookings?status=&search=
*/
pub async fn bookings(
    state: web::Data<AppState>,
    query: web::Query<BookingFilterQuery>,
) -> impl Responder {
    match state.bookings.all_bookings().await {
        Ok(all) => HttpResponse::Ok().json(filter_bookings(&all, query.status, query.search.trim())),
        Err(err) => storage_error(err),
    }
}

/*
    /api/admin/reviews?status=&rating=&search=
*/
pub async fn reviews(
    state: web::Data<AppState>,
    query: web::Query<ReviewFilterQuery>,
) -> impl Responder {
    match state.bookings.all_reviews().await {
        Ok(all) => HttpResponse::Ok().json(filter_reviews(
            &all,
            query.status,
            query.rating,
            query.search.trim(),
        )),
        Err(err) => storage_error(err),
    }
}

/*
    /api/admin/stats
*/
pub async fn stats(state: web::Data<AppState>) -> impl Responder {
    let (bookings, reviews) =
        futures::join!(state.bookings.all_bookings(), state.bookings.all_reviews());

    match (bookings, reviews) {
        (Ok(bookings), Ok(reviews)) => HttpResponse::Ok().json(calculate_stats(&bookings, &reviews)),
        (Err(err), _) | (_, Err(err)) => storage_error(err),
    }
}
