pub mod conditional;
pub mod error;
pub mod runs;

use axum::{Router, routing::get};

use crate::AppState;

pub use error::ApiError;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/jobs", get(runs::list_jobs))
        .route("/jobs/{job}/runs", get(runs::list_runs))
        .route(
            "/jobs/{job}/runs/{id}",
            get(runs::get_run)
                .put(runs::publish_run)
                .delete(runs::delete_run),
        )
}
