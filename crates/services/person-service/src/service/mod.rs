//! Service layer - access to both datasources.

mod person_directory;

pub use person_directory::{PersonCounts, PersonDirectory, PersonListing};
