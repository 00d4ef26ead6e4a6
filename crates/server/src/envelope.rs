//! Unwraps a `HandlerResponse` into a plain HTTP reply.

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::response::{HandlerResponse, ResponseBody};
use tracing::warn;

/// `statusCode` becomes the HTTP status, envelope headers are copied, record
/// bodies are sent as JSON and text bodies as `text/plain`.
pub struct HttpEnvelope(pub HandlerResponse);

impl IntoResponse for HttpEnvelope {
    fn into_response(self) -> Response {
        let HandlerResponse { status_code, headers, body } = self.0;
        let status = status_code
            .parse::<u16>()
            .ok()
            .and_then(|code| StatusCode::from_u16(code).ok())
            .unwrap_or_else(|| {
                warn!(%status_code, "envelope carries an invalid status code");
                StatusCode::INTERNAL_SERVER_ERROR
            });

        let mut response = match body {
            ResponseBody::Record(record) => Json(record).into_response(),
            ResponseBody::Text(text) => text.into_response(),
        };
        *response.status_mut() = status;

        for (name, value) in headers.unwrap_or_default() {
            match (HeaderName::from_bytes(name.as_bytes()), HeaderValue::from_str(&value)) {
                (Ok(name), Ok(value)) => {
                    response.headers_mut().insert(name, value);
                }
                _ => warn!(%name, "skipping envelope header that is not valid HTTP"),
            }
        }
        response
    }
}
