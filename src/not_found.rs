//! The response for routes that do not exist.
use axum::response::{IntoResponse, Response};

use crate::Error;

/// The fallback handler, responds with a JSON message and the status code 404.
pub async fn get_404_not_found() -> Response {
    Error::NotFound.into_response()
}
