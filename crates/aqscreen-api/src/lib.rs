//! aqscreen-api
//!
//! HTTP host for the screening engine. Runs as a Lambda function or as a
//! plain TCP server depending on the environment.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::middleware as axum_mw;
use axum::routing::{get, post};
use axum::Router;
use tower::ServiceBuilder;

use config::ApiConfig;
use state::AppState;

pub fn router(state: AppState, config: &ApiConfig) -> Router {
    // Protected routes
    let history = Router::new()
        .route(
            "/screening-history",
            get(routes::history::list_screenings).post(routes::history::create_screening),
        )
        .route(
            "/screening-history/{id}",
            get(routes::history::get_screening).delete(routes::history::delete_screening),
        )
        .route_layer(axum_mw::from_fn(middleware::auth::require_auth));

    Router::new()
        // Health (no auth)
        .route("/health", get(routes::health::health_check))
        // Instruments (no auth, public questionnaire data)
        .route("/instruments", get(routes::instruments::list_instruments))
        .route(
            "/instruments/{id}",
            get(routes::instruments::get_instrument_detail),
        )
        .route("/questions", get(routes::instruments::list_questions))
        // Scoring is stateless and anonymous
        .route("/screening", post(routes::screening::screen))
        .route("/screening/summary", post(routes::screening::summarize))
        .merge(history)
        .layer(
            ServiceBuilder::new()
                .layer(config.cors_layer())
                .layer(axum_mw::from_fn(middleware::audit::audit_log)),
        )
        .with_state(state)
}
