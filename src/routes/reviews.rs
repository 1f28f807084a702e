use actix_web::{web, HttpResponse, Responder};

use crate::{
    models::review::ReviewRequest,
    services::{
        admin_service::reviews_for_tour, tour_filter_service::find_tour,
        validation_service::validate_review,
    },
    state::AppState,
};

/*
    /api/reviews
*/
pub async fn create(state: web::Data<AppState>, input: web::Json<ReviewRequest>) -> impl Responder {
    let request = input.into_inner();
    if let Err(errors) = validate_review(&request) {
        return HttpResponse::BadRequest().json(serde_json::json!({ "errors": errors }));
    }

    let tour_name = match request.tour_id {
        Some(id) => {
            let all = state.tours.all().await;
            match find_tour(&all, id) {
                Some(tour) => tour.title.clone(),
                None => {
                    return HttpResponse::NotFound()
                        .json(serde_json::json!({ "error": format!("Tour {} not found", id) }))
                }
            }
        }
        None => request.tour_name.clone().unwrap_or_else(|| "Tour".to_string()),
    };

    match state.bookings.create_review(&request, tour_name).await {
        Ok(review) => HttpResponse::Created().json(review),
        Err(err) => {
            log::error!("Failed to store review: {}", err);
            HttpResponse::InternalServerError().body("Failed to create review.")
        }
    }
}

/*
    /api/tours/{id}/reviews
*/
pub async fn by_tour(state: web::Data<AppState>, path: web::Path<u32>) -> impl Responder {
    match state.bookings.all_reviews().await {
        Ok(reviews) => HttpResponse::Ok().json(reviews_for_tour(&reviews, path.into_inner())),
        Err(err) => {
            log::error!("Failed to read reviews: {}", err);
            HttpResponse::InternalServerError().body("Failed to read reviews.")
        }
    }
}
