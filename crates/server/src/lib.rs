pub mod envelope;
pub mod errors;
pub mod routes;
pub mod startup;
pub mod state;

pub use startup::{load_config, run};
