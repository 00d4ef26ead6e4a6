use std::sync::Arc;

use models::{TableName, VisitEvent, VisitRecord};
use tracing::info;

use super::VisitOutcome;
use crate::errors::ServiceError;
use crate::store::{GetItemRequest, PutItemRequest, VisitStore};

/// Read the current count (0 when absent), add one, overwrite the record.
///
/// The read and the write are separate store calls with nothing in between
/// holding the record, so two concurrent increments of the same id can read
/// the same count and both write `count + 1`: one visit is lost. Callers that
/// need exact counts under contention must serialise increments per id.
#[derive(Clone)]
pub struct IncrementHandler {
    store: Arc<dyn VisitStore>,
    table: TableName,
}

impl IncrementHandler {
    pub fn new(store: Arc<dyn VisitStore>, table: TableName) -> Self {
        Self { store, table }
    }

    pub async fn handle(&self, event: &VisitEvent) -> Result<VisitOutcome, ServiceError> {
        let current = self
            .store
            .get_item(GetItemRequest { table_name: self.table.clone(), id: event.id.clone() })
            .await?
            .item
            .map(|r| r.count)
            .unwrap_or(0);

        let count = current
            .checked_add(1)
            .ok_or_else(|| ServiceError::Overflow(format!("visit count for `{}` is at its maximum", event.id)))?;

        let out = self
            .store
            .put_item(PutItemRequest {
                table_name: self.table.clone(),
                item: VisitRecord::new(event.id.clone(), count),
            })
            .await?;
        info!(id = %event.id, count, status = out.status, "visit counted");
        Ok(VisitOutcome::Counted { status: out.status, count })
    }
}
