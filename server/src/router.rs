//! Route table and middleware stack.

use crate::handlers::{applicants, health, programs, questions};
use crate::state::AppState;
use axum::Router;
use axum::routing::{get, post, put};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Build the full application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health::healthz))
        // Applicant form flow
        .route(
            "/api/v1/applicants",
            post(applicants::create).get(applicants::list),
        )
        .route("/api/v1/applicants/:id", get(applicants::get))
        .route(
            "/api/v1/applicants/:id/programs/:program_id",
            get(applicants::program_view),
        )
        .route(
            "/api/v1/applicants/:id/programs/:program_id/blocks/:block_id",
            post(applicants::update_block),
        )
        // Program administration
        .route(
            "/api/v1/programs",
            post(programs::create).get(programs::list),
        )
        .route("/api/v1/programs/:id", get(programs::get))
        .route("/api/v1/programs/:id/blocks", post(programs::add_block))
        .route(
            "/api/v1/programs/:id/blocks/:block_id",
            put(programs::update_block),
        )
        .route(
            "/api/v1/programs/:id/blocks/:block_id/questions",
            put(programs::set_block_questions),
        )
        // Question administration
        .route(
            "/api/v1/questions",
            post(questions::create).get(questions::list),
        )
        .route("/api/v1/questions/:id", get(questions::get))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
