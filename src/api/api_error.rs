use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// One envelope for every failure class. Bad client input and upstream
/// outage alike are status 500 with `{"error": "<message>"}`: the web
/// clients consuming the bridge key off the `error` field, never the
/// status code, and the contract keeps it that way.
pub(crate) struct APIError(anyhow::Error);

impl IntoResponse for APIError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": format!("{}", self.0),
        }));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

impl<E> From<E> for APIError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
