//! Both datasource repositories behind one handle.

use std::sync::Arc;

use common::AppResult;
use domain::{Datasource, Person};

use crate::repository::PersonRepository;

/// The four working routine counts, in reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersonCounts {
    pub primary_count: i32,
    pub primary_count_2: i32,
    pub secondary_count: i32,
    pub secondary_count_2: i32,
}

/// Every person, grouped by datasource.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonListing {
    pub primary: Vec<Person>,
    pub secondary: Vec<Person>,
}

/// Holds the repository bound to each datasource.
///
/// Bindings are fixed at construction; nothing switches a repository to a
/// different store afterwards.
#[derive(Clone)]
pub struct PersonDirectory {
    primary: Arc<dyn PersonRepository>,
    secondary: Arc<dyn PersonRepository>,
}

impl PersonDirectory {
    pub fn new(primary: Arc<dyn PersonRepository>, secondary: Arc<dyn PersonRepository>) -> Self {
        Self { primary, secondary }
    }

    /// Repository bound to `datasource`
    pub fn repository(&self, datasource: Datasource) -> &Arc<dyn PersonRepository> {
        match datasource {
            Datasource::Primary => &self.primary,
            Datasource::Secondary => &self.secondary,
        }
    }

    /// Fetch every person from both datasources.
    pub async fn list_all(&self) -> AppResult<PersonListing> {
        Ok(PersonListing {
            primary: self.primary.find_all().await?,
            secondary: self.secondary.find_all().await?,
        })
    }

    /// Run both working count routines on both datasources, primary first.
    ///
    /// The first failure aborts the remaining calls.
    pub async fn counts(&self) -> AppResult<PersonCounts> {
        Ok(PersonCounts {
            primary_count: self.primary.person_count().await?,
            primary_count_2: self.primary.person_count_2().await?,
            secondary_count: self.secondary.person_count().await?,
            secondary_count_2: self.secondary.person_count_2().await?,
        })
    }

    /// Ping each datasource.
    pub async fn ping_all(&self) -> Vec<(Datasource, AppResult<()>)> {
        let mut results = Vec::with_capacity(Datasource::ALL.len());
        for datasource in Datasource::ALL {
            results.push((datasource, self.repository(datasource).ping().await));
        }
        results
    }
}
