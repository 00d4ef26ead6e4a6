use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use async_trait::async_trait;
use dashmap::DashMap;
use models::{TableName, VisitRecord};
use tokio::sync::OnceCell;
use tracing::{debug, info};

use super::{
    DeleteItemOutput, DeleteItemRequest, GetItemOutput, GetItemRequest, PutItemOutput,
    PutItemRequest, VisitStore, STATUS_OK,
};
use crate::errors::ServiceError;
use crate::storage::json_map_store::JsonMapStore;

type Table = Arc<JsonMapStore<String, VisitRecord>>;

/// JSON-file tables under `data_dir`, one `<table>.json` per table, each a map
/// of `id -> record`. Tables are opened on first use and kept open; concurrent
/// first uses of a table share one open.
pub struct FileVisitStore {
    data_dir: PathBuf,
    tables: DashMap<String, Arc<OnceCell<Table>>>,
}

impl FileVisitStore {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self { data_dir: data_dir.as_ref().to_path_buf(), tables: DashMap::new() }
    }

    pub fn table_path(&self, table: &TableName) -> PathBuf {
        self.data_dir.join(format!("{}.json", table.as_str()))
    }

    async fn table(&self, name: &TableName) -> Result<Table, ServiceError> {
        if name.as_str().contains(['/', '\\']) || name.as_str().starts_with('.') {
            return Err(ServiceError::Validation(format!("table name `{name}` is not a plain file name")));
        }
        // Clone the cell out so the map shard is not locked across the await.
        let cell = Arc::clone(self.tables.entry(name.as_str().to_owned()).or_default().value());
        let table = cell
            .get_or_try_init(|| async {
                let path = self.table_path(name);
                let opened = JsonMapStore::open(&path).await?;
                info!(table = %name, path = %path.display(), "opened file table");
                Ok::<_, ServiceError>(opened)
            })
            .await?;
        Ok(Arc::clone(table))
    }
}

#[async_trait]
impl VisitStore for FileVisitStore {
    async fn get_item(&self, req: GetItemRequest) -> Result<GetItemOutput, ServiceError> {
        let table = self.table(&req.table_name).await?;
        let item = table.get(&req.id).await;
        debug!(table = %req.table_name, id = %req.id, found = item.is_some(), "file get_item");
        Ok(GetItemOutput { status: STATUS_OK, item })
    }

    async fn put_item(&self, req: PutItemRequest) -> Result<PutItemOutput, ServiceError> {
        let table = self.table(&req.table_name).await?;
        debug!(table = %req.table_name, id = %req.item.id, count = req.item.count, "file put_item");
        table.insert(req.item.id.clone(), req.item).await?;
        Ok(PutItemOutput { status: STATUS_OK })
    }

    async fn delete_item(&self, req: DeleteItemRequest) -> Result<DeleteItemOutput, ServiceError> {
        let table = self.table(&req.table_name).await?;
        let existed = table.remove(&req.id).await?;
        debug!(table = %req.table_name, id = %req.id, existed, "file delete_item");
        Ok(DeleteItemOutput { status: STATUS_OK })
    }
}
