use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

use crate::{models::promo::PromoOutcome, services::pricing_service::PricingService};

#[derive(Debug, Deserialize)]
pub struct ApplyPromoRequest {
    #[serde(default)]
    code: String,
    subtotal: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyPromoResponse {
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
    discount: f64,
    total: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/*
    /api/promo/apply
*/
pub async fn apply(input: web::Json<ApplyPromoRequest>) -> impl Responder {
    if !(input.subtotal.is_finite() && input.subtotal >= 0.0) {
        return HttpResponse::BadRequest()
            .json(serde_json::json!({ "error": "Subtotal must be a non-negative number" }));
    }

    let outcome = PricingService::apply_promo(&input.code, input.subtotal);
    let discount = outcome.discount();

    HttpResponse::Ok().json(ApplyPromoResponse {
        valid: matches!(outcome, PromoOutcome::Applied { .. }),
        code: outcome.applied_code().map(str::to_string),
        discount,
        total: input.subtotal - discount,
        error: outcome.error(),
    })
}
