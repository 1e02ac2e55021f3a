#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the ipaws-map application.
//!
//! Serves the REST API a map frontend needs: archived alerts for a
//! date window (optionally narrowed to a viewport), the flat marker
//! list for pin placement, one alert's boundary geometry for highlight
//! and zoom-to-fit, and postal-code geocoding for recentering.
//!
//! The server holds no state beyond a shared HTTP client — every
//! request is a fresh pull from the `OpenFEMA` archive followed by
//! pure geometry derivations.

mod handlers;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};

/// Shared application state.
pub struct AppState {
    /// HTTP client shared by the archive and geocoding adapters.
    pub client: reqwest::Client,
    /// Nominatim endpoint (overridable for self-hosted instances).
    pub nominatim_url: String,
}

/// Starts the ipaws-map API server.
///
/// Reads `BIND_ADDR` and `PORT` from the environment (defaulting to
/// `127.0.0.1:8080`). This is a regular async function — the caller
/// provides the runtime via `#[actix_web::main]`.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built, the server
/// fails to bind, or it encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server() -> std::io::Result<()> {
    let client = ipaws_map_source::build_http_client()
        .map_err(|e| std::io::Error::other(e.to_string()))?;

    let nominatim_url = std::env::var("NOMINATIM_URL")
        .unwrap_or_else(|_| ipaws_map_geocoder::nominatim::DEFAULT_BASE_URL.to_string());

    let state = web::Data::new(AppState {
        client,
        nominatim_url,
    });

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .service(
                web::scope("/api")
                    .route("/health", web::get().to(handlers::health))
                    .route("/alerts", web::get().to(handlers::alerts))
                    .route("/markers", web::get().to(handlers::markers))
                    .route("/boundaries", web::get().to(handlers::boundaries))
                    .route("/geocode", web::get().to(handlers::geocode)),
            )
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
