use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// Stored `{id, count}` pair for one identifier. `id` is the table's primary key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitRecord {
    pub id: String,
    pub count: u64,
}

impl VisitRecord {
    pub fn new(id: impl Into<String>, count: u64) -> Self {
        Self { id: id.into(), count }
    }
}

/// Inbound invocation payload. `id` is required; no format constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitEvent {
    pub id: String,
}

/// Name of the table every handler addresses, fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableName(String);

impl TableName {
    pub fn new(name: impl Into<String>) -> Result<Self, ModelError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ModelError::Validation("table name must not be empty".into()));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
