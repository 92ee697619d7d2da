//! Persistence model: SeaORM entities for `bank`, `client` and `deposit`,
//! the field validators applied to incoming data, and connection helpers.

pub mod errors;
pub mod db;
pub mod legal_form;
pub mod bank;
pub mod client;
pub mod deposit;

pub use legal_form::LegalForm;

#[cfg(test)]
mod tests;
