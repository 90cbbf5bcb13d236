use std::sync::Arc;

use axum::{Router, middleware::from_fn};
use tower_http::services::ServeDir;

use crate::{
    logging::http_trace_layer,
    middleware::{catch_panic_layer, json_error_middleware},
    state::AppState,
};

use super::api;

pub const API_PREFIX: &str = "/api/v1";
pub const UPLOADS_PATH: &str = "/uploads";

/// The full application: JSON API, uploaded photos and the middleware stack.
pub fn router(state: Arc<AppState>) -> Router {
    let uploads = ServeDir::new(state.config.storage.upload_dir.clone());
    Router::new()
        .nest(API_PREFIX, api::router(state))
        .nest_service(UPLOADS_PATH, uploads)
        .layer(from_fn(json_error_middleware))
        .layer(catch_panic_layer())
        .layer(http_trace_layer())
}
