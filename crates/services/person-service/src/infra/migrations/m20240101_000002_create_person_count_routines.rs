//! Migration: Create the stored routines behind the person counts.
//!
//! Postgres only; other backends have no stored routines and skip it.

use sea_orm::{ConnectionTrait, DatabaseBackend};
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

const CREATE_ROUTINES: &str = r#"
CREATE SCHEMA IF NOT EXISTS schema1;

CREATE OR REPLACE FUNCTION public.get_person_count() RETURNS integer
    LANGUAGE sql STABLE
    AS $$ SELECT COUNT(*)::integer FROM public.person $$;

CREATE OR REPLACE FUNCTION schema1.get_person_count() RETURNS integer
    LANGUAGE sql STABLE
    AS $$ SELECT COUNT(*)::integer FROM public.person $$;
"#;

const DROP_ROUTINES: &str = r#"
DROP FUNCTION IF EXISTS schema1.get_person_count();
DROP FUNCTION IF EXISTS public.get_person_count();
DROP SCHEMA IF EXISTS schema1;
"#;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        if manager.get_database_backend() != DatabaseBackend::Postgres {
            return Ok(());
        }

        manager
            .get_connection()
            .execute_unprepared(CREATE_ROUTINES)
            .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        if manager.get_database_backend() != DatabaseBackend::Postgres {
            return Ok(());
        }

        manager
            .get_connection()
            .execute_unprepared(DROP_ROUTINES)
            .await?;
        Ok(())
    }
}
