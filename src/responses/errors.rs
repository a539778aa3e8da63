use crate::errors::ServerError;
use crate::templates::components::error_page;
use astra::{Body, Response, ResponseBuilder};
use serde_json::json;
use tracing::{error, warn};

pub const API_PREFIX: &str = "/api/";

/// Convert a ServerError into a response: JSON under `/api/`, an HTML page elsewhere.
pub fn error_response(err: ServerError, path: &str) -> Response {
    let status = err.status();
    if status >= 500 {
        error!(%path, status, "{err}");
    } else {
        warn!(%path, status, "{err}");
    }

    let message = match &err {
        ServerError::InternalError => "Internal Server Error".to_string(),
        other => other.to_string(),
    };

    let (content_type, body) = if path.starts_with(API_PREFIX) {
        (
            mime::APPLICATION_JSON.to_string(),
            json!({ "error": message }).to_string(),
        )
    } else {
        (
            mime::TEXT_HTML_UTF_8.to_string(),
            error_page(status, &message).into_string(),
        )
    };

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", content_type)
        .body(Body::from(body))
        .unwrap_or_else(|_| Response::new(Body::from("Internal Server Error")))
}
