use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use tour_catalog_api::{config::AppConfig, routes, state::AppState};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    println!("Application starting...");

    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    } else {
        println!("Release mode");
    }

    env_logger::init_from_env(Env::default().default_filter_or("info"));
    println!("Logger initialized");

    let config = AppConfig::from_env();
    println!("Tours source: {}", config.tours_source);
    println!("Destinations source: {}", config.destinations_source);

    let state = web::Data::new(AppState::new(&config));

    // Warm the catalog cache; a failure here is retried on the first request
    let tours = state.tours.all().await;
    println!("Loaded {} tours", tours.len());

    println!("Attempting to bind to {}:{}", config.host, config.port);
    println!("Starting HTTP server...");

    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(routes::configure)
    })
    .bind((config.host.clone(), config.port))?
    .run()
    .await
}
