use axum::{routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

use crate::openapi::ApiDoc;

pub mod state;
pub mod garages;
pub mod services;
pub mod auto_parts_shops;

pub use state::ServerState;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the application router: health, garage/service/shop APIs and Swagger UI.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let garages = Router::new()
        .route("/api/garages", get(garages::list).post(garages::create))
        .route("/api/garages/search", get(garages::search))
        .route("/api/garages/top-rated", get(garages::top_rated))
        .route("/api/garages/:id", get(garages::get).put(garages::update).delete(garages::delete))
        .route("/api/garages/:id/statistics", get(garages::statistics));

    let services = Router::new()
        .route("/api/services", get(services::list).post(services::create))
        .route("/api/services/garage/:garage_id", get(services::by_garage))
        .route("/api/services/:id", get(services::get).put(services::update).delete(services::delete));

    let shops = Router::new()
        .route("/api/auto-parts-shops", get(auto_parts_shops::list).post(auto_parts_shops::create))
        .route(
            "/api/auto-parts-shops/:id",
            get(auto_parts_shops::get).put(auto_parts_shops::update).delete(auto_parts_shops::delete),
        );

    Router::new()
        .route("/health", get(health))
        .merge(garages)
        .merge(services)
        .merge(shops)
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // one INFO span per request with method and path
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                // status code and latency
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
