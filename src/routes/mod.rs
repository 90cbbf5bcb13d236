pub mod api;
mod entry;

pub use entry::{API_PREFIX, UPLOADS_PATH, router};
