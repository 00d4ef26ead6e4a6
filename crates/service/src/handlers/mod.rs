//! The get, increment and delete entry points.
//!
//! Handlers are independent: none calls another, and each performs one
//! lookup and at most one write against the table it was built with.

use std::sync::Arc;

use models::{TableName, VisitRecord};

use crate::store::VisitStore;

mod delete;
mod get;
mod increment;

pub use delete::DeleteHandler;
pub use get::GetHandler;
pub use increment::IncrementHandler;

/// What a handler observed. Store failures travel as `Err(ServiceError)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisitOutcome {
    /// Get: the stored record.
    Found(VisitRecord),
    /// Increment: status of the write and the count that was written.
    Counted { status: u16, count: u64 },
    /// Delete: status of the delete and the id that was removed.
    Deleted { status: u16, id: String },
    /// Get or delete on an id with no record.
    NotFound,
}

/// The three handlers over one store and table, for hosts that serve all of them.
#[derive(Clone)]
pub struct VisitHandlers {
    pub get: GetHandler,
    pub increment: IncrementHandler,
    pub delete: DeleteHandler,
}

impl VisitHandlers {
    pub fn new(store: Arc<dyn VisitStore>, table: TableName) -> Self {
        Self {
            get: GetHandler::new(Arc::clone(&store), table.clone()),
            increment: IncrementHandler::new(Arc::clone(&store), table.clone()),
            delete: DeleteHandler::new(store, table),
        }
    }
}
