use std::sync::Arc;

use models::{TableName, VisitEvent};
use tracing::info;

use super::VisitOutcome;
use crate::errors::ServiceError;
use crate::store::{DeleteItemRequest, GetItemRequest, VisitStore};

/// Remove a record if it exists; absent ids leave the table untouched.
#[derive(Clone)]
pub struct DeleteHandler {
    store: Arc<dyn VisitStore>,
    table: TableName,
}

impl DeleteHandler {
    pub fn new(store: Arc<dyn VisitStore>, table: TableName) -> Self {
        Self { store, table }
    }

    pub async fn handle(&self, event: &VisitEvent) -> Result<VisitOutcome, ServiceError> {
        let existing = self
            .store
            .get_item(GetItemRequest { table_name: self.table.clone(), id: event.id.clone() })
            .await?;
        if existing.item.is_none() {
            return Ok(VisitOutcome::NotFound);
        }

        let out = self
            .store
            .delete_item(DeleteItemRequest { table_name: self.table.clone(), id: event.id.clone() })
            .await?;
        info!(id = %event.id, status = out.status, "visit record deleted");
        Ok(VisitOutcome::Deleted { status: out.status, id: event.id.clone() })
    }
}
