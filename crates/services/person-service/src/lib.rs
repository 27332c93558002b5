//! Person Service Library
//!
//! Data access for the `person` collection held in two independently
//! configured datasources. Each datasource gets its own connection pool,
//! migrations and routine bindings; [`PersonDirectory`] hands out the
//! repository bound to each one.

pub mod config;
pub mod infra;
pub mod repository;
pub mod routines;
pub mod service;

use std::sync::Arc;

use tracing::info;

use common::AppResult;
use domain::Datasource;

use crate::config::PersonServiceConfig;
use crate::infra::Database;
use crate::repository::PersonStore;
use crate::routines::RoutineTable;

pub use crate::service::{PersonCounts, PersonDirectory, PersonListing};

/// Connect both datasources and build the directory.
///
/// Routine bindings are validated before any connection is opened, so a
/// bad binding aborts startup instead of failing on first use.
pub async fn connect(config: &PersonServiceConfig) -> AppResult<PersonDirectory> {
    let routines = RoutineTable::from_bindings(config.routine_bindings.iter().cloned())?;
    info!(bindings = routines.len(), "Routine table resolved");

    let primary = Database::connect(Datasource::Primary, &config.primary).await?;
    let secondary = Database::connect(Datasource::Secondary, &config.secondary).await?;

    let primary_repo = Arc::new(PersonStore::new(
        primary.into_connection(),
        routines.for_datasource(Datasource::Primary),
    ));
    let secondary_repo = Arc::new(PersonStore::new(
        secondary.into_connection(),
        routines.for_datasource(Datasource::Secondary),
    ));

    Ok(PersonDirectory::new(primary_repo, secondary_repo))
}

/// Migration action type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}

/// Run migrations on one datasource, or on both when `datasource` is `None`.
pub async fn run_migrations(
    config: &PersonServiceConfig,
    datasource: Option<Datasource>,
    action: MigrateAction,
) -> AppResult<()> {
    let targets: Vec<Datasource> = match datasource {
        Some(ds) => vec![ds],
        None => Datasource::ALL.to_vec(),
    };

    for target in targets {
        let db = Database::connect_without_migrations(target, config.database(target)).await?;

        match action {
            MigrateAction::Up => {
                db.run_migrations().await?;
                info!(datasource = %target, "Migrations applied successfully");
            }
            MigrateAction::Down => {
                db.rollback_migration().await?;
                info!(datasource = %target, "Rolled back last migration");
            }
            MigrateAction::Status => {
                let status = db.migration_status().await?;
                println!("{}:", target);
                for (name, applied) in status {
                    let marker = if applied { "[x]" } else { "[ ]" };
                    println!("  {} {}", marker, name);
                }
            }
            MigrateAction::Fresh => {
                tracing::warn!(datasource = %target, "Resetting database");
                db.fresh_migrations().await?;
                info!(datasource = %target, "Database reset and migrations applied");
            }
        }
    }

    Ok(())
}
