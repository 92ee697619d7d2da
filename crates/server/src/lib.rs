pub mod routes;
pub mod startup;
pub mod state;
pub mod extract;
pub mod errors;
pub mod openapi;

pub use startup::{load_config, run};
