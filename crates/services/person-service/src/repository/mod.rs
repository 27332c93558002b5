//! Repository layer for data access.

pub mod entities;
mod person_repository;

pub use person_repository::{PersonRepository, PersonStore};

// Export mock for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use person_repository::MockPersonRepository;
