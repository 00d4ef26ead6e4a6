use axum::{
    extract::{Path, State},
    Json,
};
use models::VisitEvent;
use service::response::HandlerResponse;

use crate::envelope::HttpEnvelope;
use crate::errors::ApiError;
use crate::state::AppState;

pub async fn invoke_get(
    State(state): State<AppState>,
    Json(event): Json<VisitEvent>,
) -> Result<Json<HandlerResponse>, ApiError> {
    let outcome = state.handlers.get.handle(&event).await?;
    Ok(Json(state.envelope(outcome)))
}

pub async fn invoke_increment(
    State(state): State<AppState>,
    Json(event): Json<VisitEvent>,
) -> Result<Json<HandlerResponse>, ApiError> {
    let outcome = state.handlers.increment.handle(&event).await?;
    Ok(Json(state.envelope(outcome)))
}

pub async fn invoke_delete(
    State(state): State<AppState>,
    Json(event): Json<VisitEvent>,
) -> Result<Json<HandlerResponse>, ApiError> {
    let outcome = state.handlers.delete.handle(&event).await?;
    Ok(Json(state.envelope(outcome)))
}

pub async fn get_visit(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<HttpEnvelope, ApiError> {
    let outcome = state.handlers.get.handle(&VisitEvent { id }).await?;
    Ok(HttpEnvelope(state.envelope(outcome)))
}

pub async fn increment_visit(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<HttpEnvelope, ApiError> {
    let outcome = state.handlers.increment.handle(&VisitEvent { id }).await?;
    Ok(HttpEnvelope(state.envelope(outcome)))
}

pub async fn delete_visit(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<HttpEnvelope, ApiError> {
    let outcome = state.handlers.delete.handle(&VisitEvent { id }).await?;
    Ok(HttpEnvelope(state.envelope(outcome)))
}
