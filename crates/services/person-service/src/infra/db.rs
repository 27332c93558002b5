//! Database connection and initialization, one connection pool per datasource.

use std::collections::HashSet;

use sea_orm::{
    ConnectOptions, Database as SeaDatabase, DatabaseConnection, DbErr, EntityTrait, QueryOrder,
};
use sea_orm_migration::{seaql_migrations, MigratorTrait};

use common::DatabaseConfig;
use domain::Datasource;

use super::migrations::Migrator;

/// Database wrapper for connection management
pub struct Database {
    connection: DatabaseConnection,
}

impl Database {
    /// Initialize the datasource connection and run migrations.
    pub async fn connect(datasource: Datasource, config: &DatabaseConfig) -> Result<Self, DbErr> {
        let db = Self::connect_without_migrations(datasource, config).await?;

        // Run pending migrations
        Migrator::up(&db.connection, None).await?;
        tracing::info!(%datasource, "Database connected and migrations applied");

        Ok(db)
    }

    /// Connect without running migrations (for CLI commands).
    pub async fn connect_without_migrations(
        datasource: Datasource,
        config: &DatabaseConfig,
    ) -> Result<Self, DbErr> {
        let mut options = ConnectOptions::new(config.url.clone());
        options
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .sqlx_logging(false);

        let connection = SeaDatabase::connect(options).await?;
        tracing::debug!(%datasource, "Connection pool opened");
        Ok(Self { connection })
    }

    /// Hand the connection pool over to its repository.
    pub fn into_connection(self) -> DatabaseConnection {
        self.connection
    }

    /// Run pending migrations.
    pub async fn run_migrations(&self) -> Result<(), DbErr> {
        Migrator::up(&self.connection, None).await
    }

    /// Rollback the last migration.
    pub async fn rollback_migration(&self) -> Result<(), DbErr> {
        Migrator::down(&self.connection, Some(1)).await
    }

    /// Get migration status (list all migrations with applied status).
    pub async fn migration_status(&self) -> Result<Vec<(String, bool)>, DbErr> {
        // Get applied migrations from database
        let applied: HashSet<String> = seaql_migrations::Entity::find()
            .order_by_asc(seaql_migrations::Column::Version)
            .all(&self.connection)
            .await?
            .into_iter()
            .map(|m| m.version)
            .collect();

        // Map all defined migrations with their applied status
        let migrations: Vec<(String, bool)> = Migrator::migrations()
            .iter()
            .map(|m| {
                let name = m.name().to_string();
                let is_applied = applied.contains(&name);
                (name, is_applied)
            })
            .collect();

        Ok(migrations)
    }

    /// Reset database and run all migrations fresh.
    pub async fn fresh_migrations(&self) -> Result<(), DbErr> {
        Migrator::fresh(&self.connection).await
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::ConnectionTrait;

    use super::*;

    fn memory_config() -> DatabaseConfig {
        DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
        }
    }

    #[tokio::test]
    async fn connect_applies_every_migration() {
        let db = Database::connect(Datasource::Primary, &memory_config())
            .await
            .unwrap();

        let status = db.migration_status().await.unwrap();
        assert_eq!(status.len(), 2);
        assert!(status.iter().all(|(_, applied)| *applied));
    }

    #[tokio::test]
    async fn into_connection_keeps_the_pool_usable() {
        let db = Database::connect(Datasource::Secondary, &memory_config())
            .await
            .unwrap();

        let connection = db.into_connection();
        connection.ping().await.unwrap();
        connection
            .execute_unprepared("INSERT INTO person (id, name) VALUES ('1', 'Alice')")
            .await
            .unwrap();
    }
}
