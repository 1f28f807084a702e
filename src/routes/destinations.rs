use actix_web::{web, HttpResponse, Responder};

use crate::state::AppState;

/*
    /api/destinations
*/
pub async fn list(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.destinations.active().await)
}

/*
    /api/destinations/{id}
*/
pub async fn get_by_id(state: web::Data<AppState>, path: web::Path<u32>) -> impl Responder {
    match state.destinations.find(path.into_inner()).await {
        Some(destination) => HttpResponse::Ok().json(destination),
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "Destination not found" })),
    }
}
