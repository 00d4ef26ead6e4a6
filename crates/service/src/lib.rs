//! Visit counter service layer.
//! - `store`: typed get/put/delete client over a key-value table, with
//!   memory, JSON-file and DynamoDB backends.
//! - `handlers`: the get, increment and delete entry points.
//! - `response`: conversion of handler outcomes into the response envelope.

pub mod errors;
pub mod storage;
pub mod store;
pub mod handlers;
pub mod response;
