//! Storage helpers for service layer
//!
//! Reusable file-backed map used by the JSON-file table backend.

pub mod json_map_store;
