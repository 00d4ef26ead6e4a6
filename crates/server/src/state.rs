use std::sync::Arc;

use models::TableName;
use service::handlers::{VisitHandlers, VisitOutcome};
use service::response::HandlerResponse;
use service::store::VisitStore;

/// Shared by every route: the handlers plus the configured allow-origin value.
#[derive(Clone)]
pub struct AppState {
    pub handlers: VisitHandlers,
    pub allow_origin: Arc<str>,
}

impl AppState {
    pub fn new(store: Arc<dyn VisitStore>, table: TableName, allow_origin: &str) -> Self {
        Self { handlers: VisitHandlers::new(store, table), allow_origin: Arc::from(allow_origin) }
    }

    pub fn envelope(&self, outcome: VisitOutcome) -> HandlerResponse {
        HandlerResponse::from_outcome(outcome, &self.allow_origin)
    }
}
