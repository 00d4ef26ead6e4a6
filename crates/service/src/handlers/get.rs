use std::sync::Arc;

use models::{TableName, VisitEvent};
use tracing::debug;

use super::VisitOutcome;
use crate::errors::ServiceError;
use crate::store::{GetItemRequest, VisitStore};

/// Read-only lookup of one record.
#[derive(Clone)]
pub struct GetHandler {
    store: Arc<dyn VisitStore>,
    table: TableName,
}

impl GetHandler {
    pub fn new(store: Arc<dyn VisitStore>, table: TableName) -> Self {
        Self { store, table }
    }

    pub async fn handle(&self, event: &VisitEvent) -> Result<VisitOutcome, ServiceError> {
        let out = self
            .store
            .get_item(GetItemRequest { table_name: self.table.clone(), id: event.id.clone() })
            .await?;
        debug!(id = %event.id, found = out.item.is_some(), "get visit count");
        Ok(match out.item {
            Some(record) => VisitOutcome::Found(record),
            None => VisitOutcome::NotFound,
        })
    }
}
