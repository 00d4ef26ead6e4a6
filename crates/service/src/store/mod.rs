//! Typed client for the visit table.
//!
//! Each call names the table it addresses and carries one key or one item.
//! Outputs report the HTTP status code of the underlying store call so the
//! increment and delete handlers can echo it back.

use std::sync::Arc;

use async_trait::async_trait;
use configs::{StoreBackend, StoreConfig};
use models::{TableName, VisitRecord};

use crate::errors::ServiceError;

pub mod file;
pub mod memory;
#[cfg(feature = "dynamodb")]
pub mod dynamodb;

pub use file::FileVisitStore;
pub use memory::MemoryVisitStore;
#[cfg(feature = "dynamodb")]
pub use dynamodb::DynamoVisitStore;

/// Status reported by the in-process backends for every successful call.
pub const STATUS_OK: u16 = 200;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetItemRequest {
    pub table_name: TableName,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetItemOutput {
    pub status: u16,
    pub item: Option<VisitRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutItemRequest {
    pub table_name: TableName,
    pub item: VisitRecord,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PutItemOutput {
    pub status: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteItemRequest {
    pub table_name: TableName,
    pub id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteItemOutput {
    pub status: u16,
}

/// Key-value table keyed by visit id. `put_item` is an unconditional overwrite.
#[async_trait]
pub trait VisitStore: Send + Sync {
    async fn get_item(&self, req: GetItemRequest) -> Result<GetItemOutput, ServiceError>;
    async fn put_item(&self, req: PutItemRequest) -> Result<PutItemOutput, ServiceError>;
    async fn delete_item(&self, req: DeleteItemRequest) -> Result<DeleteItemOutput, ServiceError>;
}

/// Build the configured backend.
pub async fn connect(cfg: &StoreConfig) -> Result<Arc<dyn VisitStore>, ServiceError> {
    let store: Arc<dyn VisitStore> = match cfg.backend {
        StoreBackend::Memory => Arc::new(MemoryVisitStore::new()),
        StoreBackend::File => Arc::new(FileVisitStore::new(&cfg.data_dir)),
        #[cfg(feature = "dynamodb")]
        StoreBackend::Dynamodb => Arc::new(
            DynamoVisitStore::from_env(cfg.endpoint_url.as_deref(), cfg.region.as_deref()).await,
        ),
        #[cfg(not(feature = "dynamodb"))]
        StoreBackend::Dynamodb => {
            return Err(ServiceError::Validation(
                "dynamodb backend requires the `dynamodb` feature".into(),
            ))
        }
    };
    Ok(store)
}
