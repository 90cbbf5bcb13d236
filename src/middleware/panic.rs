use std::any::Any;

use axum::response::{IntoResponse, Response};
use tower_http::catch_panic::CatchPanicLayer;

use crate::{error::AppError, logging::panic_message};

pub type PanicHandler = fn(Box<dyn Any + Send + 'static>) -> Response;

pub fn catch_panic_layer() -> CatchPanicLayer<PanicHandler> {
    CatchPanicLayer::custom(panic_to_json as PanicHandler)
}

/// Panic details go to the log only.
fn panic_to_json(panic: Box<dyn Any + Send + 'static>) -> Response {
    AppError::internal_with_source("Internal server error", panic_message(&*panic))
        .into_response()
}
