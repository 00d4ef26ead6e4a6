use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    routing::{get, post},
    Json, Router,
};
use common::types::Health;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{warn, Level};

use crate::state::AppState;

pub mod visits;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// CORS for browser callers. `*` allows any origin; anything else is sent back
/// verbatim, matching the value the handler envelope carries.
pub fn build_cors(allow_origin: &str) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]);
    if allow_origin.trim() == "*" {
        return cors.allow_origin(AllowOrigin::any());
    }
    match HeaderValue::from_str(allow_origin) {
        Ok(origin) => cors.allow_origin(AllowOrigin::exact(origin)),
        Err(_) => {
            warn!(%allow_origin, "allow_origin is not a valid header value; preflight will omit it");
            cors
        }
    }
}

/// Build the application router: health, event-style invocation and REST routes.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    // Event-style invocation: body `{"id": ...}`, reply is the envelope itself
    let invoke = Router::new()
        .route("/invoke/get", post(visits::invoke_get))
        .route("/invoke/increment", post(visits::invoke_increment))
        .route("/invoke/delete", post(visits::invoke_delete));

    // REST: the envelope is unwrapped into status, headers and body
    let rest = Router::new()
        .route("/visits/:id", get(visits::get_visit).delete(visits::delete_visit))
        .route("/visits/:id/increment", post(visits::increment_visit));

    Router::new()
        .route("/health", get(health))
        .merge(invoke)
        .merge(rest)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
