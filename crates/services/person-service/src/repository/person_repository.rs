//! Person repository implementation, one instance per datasource.

use async_trait::async_trait;
use sea_orm::{
    sea_query::OnConflict, ConnectionTrait, DatabaseConnection, EntityTrait, Set, Statement,
};

use super::entities::person::{self, ActiveModel, Entity as PersonEntity};
use crate::routines::{CountRoutine, RoutineBindings};
use common::{AppError, AppResult};
use domain::{Datasource, Person};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Column alias for scalar routine results
const COUNT_COLUMN: &str = "count";

/// Person repository trait for dependency injection.
///
/// The same contract is served by every datasource; which physical store
/// answers is fixed when the implementation is constructed.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait PersonRepository: Send + Sync {
    /// Datasource this repository is bound to
    fn datasource(&self) -> Datasource;

    /// List every stored person, in store iteration order
    async fn find_all(&self) -> AppResult<Vec<Person>>;

    /// Find a person by ID
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Person>>;

    /// Insert the person, or overwrite the record with the same ID
    async fn save(&self, person: Person) -> AppResult<Person>;

    /// Delete a person by ID. Absent IDs are a no-op.
    async fn delete_by_id(&self, id: &str) -> AppResult<()>;

    /// Result of the routine bound to `get_person_count`
    async fn person_count(&self) -> AppResult<i32>;

    /// Result of the routine bound to `get_person_count_2`
    async fn person_count_2(&self) -> AppResult<i32>;

    /// Result of the routine bound to `get_person_count_3`
    async fn person_count_3(&self) -> AppResult<i32>;

    /// Check connectivity of the underlying store
    async fn ping(&self) -> AppResult<()>;
}

/// SeaORM implementation of PersonRepository
pub struct PersonStore {
    datasource: Datasource,
    db: DatabaseConnection,
    routines: RoutineBindings,
}

impl PersonStore {
    /// Create a repository over `db` using the routines resolved for its datasource.
    pub fn new(db: DatabaseConnection, routines: RoutineBindings) -> Self {
        Self {
            datasource: routines.datasource(),
            db,
            routines,
        }
    }

    async fn call_count_routine(&self, routine: CountRoutine) -> AppResult<i32> {
        let name = self.routines.resolve(routine)?;
        tracing::debug!(
            datasource = %self.datasource,
            operation = routine.operation(),
            routine = %name,
            "Invoking stored routine"
        );

        let statement = Statement::from_string(
            self.db.get_database_backend(),
            format!("SELECT {}() AS {}", name, COUNT_COLUMN),
        );

        let row = self.db.query_one(statement).await?.ok_or_else(|| {
            AppError::internal(format!("Routine {} returned no result", name))
        })?;

        Ok(row.try_get::<i32>("", COUNT_COLUMN)?)
    }
}

#[async_trait]
impl PersonRepository for PersonStore {
    fn datasource(&self) -> Datasource {
        self.datasource
    }

    async fn find_all(&self) -> AppResult<Vec<Person>> {
        let models = PersonEntity::find()
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Person::from).collect())
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Person>> {
        let result = PersonEntity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Person::from))
    }

    async fn save(&self, person: Person) -> AppResult<Person> {
        let active_model = ActiveModel {
            id: Set(person.id.clone()),
            name: Set(person.name.clone()),
        };

        PersonEntity::insert(active_model)
            .on_conflict(
                OnConflict::column(person::Column::Id)
                    .update_column(person::Column::Name)
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(AppError::from)?;

        tracing::debug!(datasource = %self.datasource, id = %person.id, "Person saved");
        Ok(person)
    }

    async fn delete_by_id(&self, id: &str) -> AppResult<()> {
        let result = PersonEntity::delete_by_id(id.to_string())
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        tracing::debug!(
            datasource = %self.datasource,
            id,
            rows = result.rows_affected,
            "Person deleted"
        );
        Ok(())
    }

    async fn person_count(&self) -> AppResult<i32> {
        self.call_count_routine(CountRoutine::PersonCount).await
    }

    async fn person_count_2(&self) -> AppResult<i32> {
        self.call_count_routine(CountRoutine::PersonCount2).await
    }

    async fn person_count_3(&self) -> AppResult<i32> {
        self.call_count_routine(CountRoutine::PersonCount3).await
    }

    async fn ping(&self) -> AppResult<()> {
        self.db.ping().await.map_err(|e| {
            AppError::service_unavailable(format!("{} datasource ({})", self.datasource, e))
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use sea_orm::{DatabaseBackend, MockDatabase, Transaction, Value};

    use super::*;
    use crate::routines::RoutineTable;

    fn routines(datasource: Datasource) -> RoutineBindings {
        RoutineTable::from_bindings(RoutineTable::default_bindings())
            .unwrap()
            .for_datasource(datasource)
    }

    fn count_row(count: i32) -> BTreeMap<&'static str, Value> {
        BTreeMap::from([(COUNT_COLUMN, Value::Int(Some(count)))])
    }

    #[tokio::test]
    async fn person_count_calls_bound_routine() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![count_row(5)]])
            .into_connection();
        let store = PersonStore::new(db, routines(Datasource::Primary));

        assert_eq!(store.person_count().await.unwrap(), 5);
        assert_eq!(
            store.db.into_transaction_log(),
            vec![Transaction::one(Statement::from_string(
                DatabaseBackend::Postgres,
                "SELECT public.get_person_count() AS count"
            ))]
        );
    }

    #[tokio::test]
    async fn person_count_2_uses_schema_qualified_routine() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![count_row(7)]])
            .into_connection();
        let store = PersonStore::new(db, routines(Datasource::Secondary));

        assert_eq!(store.person_count_2().await.unwrap(), 7);
        assert_eq!(
            store.db.into_transaction_log(),
            vec![Transaction::one(Statement::from_string(
                DatabaseBackend::Postgres,
                "SELECT schema1.get_person_count() AS count"
            ))]
        );
    }

    #[tokio::test]
    async fn unbound_count_fails_without_touching_the_store() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let store = PersonStore::new(db, routines(Datasource::Primary));

        let err = store.person_count_3().await.unwrap_err();
        assert!(matches!(err, AppError::RoutineResolution { .. }));
        assert!(store.db.into_transaction_log().is_empty());
    }

    #[tokio::test]
    async fn ping_failure_reports_unavailable_datasource() {
        let store = PersonStore::new(
            DatabaseConnection::Disconnected,
            routines(Datasource::Secondary),
        );

        let err = store.ping().await.unwrap_err();
        assert!(matches!(err, AppError::ServiceUnavailable(ref msg) if msg.starts_with("secondary datasource")));
    }
}
