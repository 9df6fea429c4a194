pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::letter::handlers as letter_handlers;
use crate::scrape::handlers as scrape_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Job lookup
        .route("/api/v1/jobs", post(scrape_handlers::handle_lookup_jobs))
        .route("/api/v1/jobs/:job_id", get(scrape_handlers::handle_get_job))
        // Cover letter
        .route(
            "/api/v1/coverletter/:job_id",
            post(letter_handlers::handle_fill_coverletter),
        )
        .route(
            "/api/v1/coverletter/download",
            post(letter_handlers::handle_download_pdf),
        )
        .with_state(state)
}
