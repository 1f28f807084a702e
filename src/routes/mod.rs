use actix_web::web;

pub mod admin;
pub mod bookings;
pub mod destinations;
pub mod health;
pub mod promo;
pub mod reviews;
pub mod tours;

/// Register every route on an app or scope
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/api")
                .service(
                    web::scope("/tours")
                        .route("", web::get().to(tours::list))
                        .route("/featured", web::get().to(tours::featured))
                        .route("/counts", web::get().to(tours::counts))
                        .route("/search", web::get().to(tours::search))
                        .route("/type/{type}", web::get().to(tours::by_type))
                        .route("/{id}", web::get().to(tours::get_by_id))
                        .route("/{id}/recommended", web::get().to(tours::recommended))
                        .route("/{id}/reviews", web::get().to(reviews::by_tour)),
                )
                .service(
                    web::scope("/destinations")
                        .route("", web::get().to(destinations::list))
                        .route("/{id}", web::get().to(destinations::get_by_id)),
                )
                .route("/promo/apply", web::post().to(promo::apply))
                .service(
                    web::scope("/bookings")
                        .route("", web::post().to(bookings::create))
                        .route("/quote", web::post().to(bookings::quote))
                        .route("/last", web::get().to(bookings::last)),
                )
                .route("/reviews", web::post().to(reviews::create))
                .service(
                    web::scope("/admin")
                        .route("/bookings", web::get().to(admin::bookings))
                        .route("/reviews", web::get().to(admin::reviews))
                        .route("/stats", web::get().to(admin::stats)),
                ),
        );
}
