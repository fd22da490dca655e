use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Error body of the order API: a single user-facing message, nothing else.
#[derive(Serialize)]
pub struct ApiErrorBody {
    pub error: String,
}

pub fn error(message: impl Into<String>, status: StatusCode) -> Response {
    let body = ApiErrorBody {
        error: message.into(),
    };
    (status, Json(body)).into_response()
}
