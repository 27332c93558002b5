//! Database migrations.
//!
//! Every datasource runs the same migration set against its own store.
//! Migration names follow the pattern: m{YYYYMMDD}_{NNNNNN}_{description}

use sea_orm_migration::prelude::*;

mod m20240101_000001_create_person_table;
mod m20240101_000002_create_person_count_routines;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_person_table::Migration),
            Box::new(m20240101_000002_create_person_count_routines::Migration),
        ]
    }
}
