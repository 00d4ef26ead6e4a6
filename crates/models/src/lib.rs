//! Entities shared by the visit counter handlers and store clients.

pub mod errors;
pub mod visit;

pub use visit::{TableName, VisitEvent, VisitRecord};
