use crate::state::AppState;
use axum::{Router, routing::get};
use tower_http::{limit::RequestBodyLimitLayer, normalize_path::NormalizePath, trace::TraceLayer};

pub mod index;
pub mod students;

const MAX_BODY_BYTES: usize = 64 * 1024;

/// Routing happens after the trailing slash is trimmed, so `/get/5/` and `/get/5` are the
/// same request.
pub type App = NormalizePath<Router>;

pub fn router(state: AppState) -> App {
    let router = Router::new()
        .route("/test", get(index::get_test_page))
        .nest("/api/v1/student", students::router())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    NormalizePath::trim_trailing_slash(router)
}
