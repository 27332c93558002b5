//! Domain layer - Core entities shared by the datasource and web crates.
//!
//! This crate contains pure domain types with no infrastructure dependencies.

pub mod constants;
pub mod datasource;
pub mod error;
pub mod person;

pub use constants::*;
pub use datasource::Datasource;
pub use error::DomainError;
pub use person::Person;
