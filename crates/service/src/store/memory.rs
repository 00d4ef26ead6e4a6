use async_trait::async_trait;
use dashmap::DashMap;
use models::VisitRecord;
use tracing::debug;

use super::{
    DeleteItemOutput, DeleteItemRequest, GetItemOutput, GetItemRequest, PutItemOutput,
    PutItemRequest, VisitStore, STATUS_OK,
};
use crate::errors::ServiceError;

/// In-process tables keyed by `(table, id)`. Contents are lost on restart.
#[derive(Default)]
pub struct MemoryVisitStore {
    items: DashMap<(String, String), VisitRecord>,
}

impl MemoryVisitStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records across all tables.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[async_trait]
impl VisitStore for MemoryVisitStore {
    async fn get_item(&self, req: GetItemRequest) -> Result<GetItemOutput, ServiceError> {
        let key = (req.table_name.as_str().to_owned(), req.id);
        let item = self.items.get(&key).map(|r| r.value().clone());
        debug!(table = %req.table_name, id = %key.1, found = item.is_some(), "memory get_item");
        Ok(GetItemOutput { status: STATUS_OK, item })
    }

    async fn put_item(&self, req: PutItemRequest) -> Result<PutItemOutput, ServiceError> {
        debug!(table = %req.table_name, id = %req.item.id, count = req.item.count, "memory put_item");
        let key = (req.table_name.as_str().to_owned(), req.item.id.clone());
        self.items.insert(key, req.item);
        Ok(PutItemOutput { status: STATUS_OK })
    }

    async fn delete_item(&self, req: DeleteItemRequest) -> Result<DeleteItemOutput, ServiceError> {
        debug!(table = %req.table_name, id = %req.id, "memory delete_item");
        self.items.remove(&(req.table_name.as_str().to_owned(), req.id));
        Ok(DeleteItemOutput { status: STATUS_OK })
    }
}
