//! PersonStore tests against an in-memory SQLite database.
//!
//! Stored routines are Postgres-only; these tests cover the CRUD contract.

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

use domain::{Datasource, Person};
use person_service_lib::infra::Migrator;
use person_service_lib::repository::{PersonRepository, PersonStore};
use person_service_lib::routines::RoutineTable;

async fn memory_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).min_connections(1);
    let db = Database::connect(options).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}

async fn store(datasource: Datasource) -> PersonStore {
    let routines = RoutineTable::from_bindings(RoutineTable::default_bindings()).unwrap();
    PersonStore::new(memory_db().await, routines.for_datasource(datasource))
}

fn sorted(mut people: Vec<Person>) -> Vec<Person> {
    people.sort_by(|a, b| a.id.cmp(&b.id));
    people
}

#[tokio::test]
async fn test_save_then_find_by_id() {
    let repo = store(Datasource::Primary).await;

    repo.save(Person::new("1", "Alice")).await.unwrap();

    let found = repo.find_by_id("1").await.unwrap();
    assert_eq!(found, Some(Person::new("1", "Alice")));
}

#[tokio::test]
async fn test_find_by_id_missing_returns_none() {
    let repo = store(Datasource::Primary).await;
    assert_eq!(repo.find_by_id("999").await.unwrap(), None);
}

#[tokio::test]
async fn test_save_twice_overwrites_name() {
    let repo = store(Datasource::Primary).await;

    repo.save(Person::new("1", "Alice")).await.unwrap();
    repo.save(Person::new("1", "Alicia")).await.unwrap();

    let all = repo.find_all().await.unwrap();
    assert_eq!(all, vec![Person::new("1", "Alicia")]);
}

#[tokio::test]
async fn test_delete_then_find_returns_none() {
    let repo = store(Datasource::Secondary).await;

    repo.save(Person::new("7", "Grace")).await.unwrap();
    repo.delete_by_id("7").await.unwrap();

    assert_eq!(repo.find_by_id("7").await.unwrap(), None);
}

#[tokio::test]
async fn test_delete_missing_id_is_noop() {
    let repo = store(Datasource::Secondary).await;
    repo.save(Person::new("1", "Alice")).await.unwrap();

    repo.delete_by_id("does-not-exist").await.unwrap();

    assert_eq!(repo.find_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_find_all_counts_distinct_saved_minus_deleted() {
    let repo = store(Datasource::Primary).await;

    for (id, name) in [("a", "Ann"), ("b", "Bob"), ("c", "Cid"), ("a", "Anna")] {
        repo.save(Person::new(id, name)).await.unwrap();
    }
    repo.delete_by_id("b").await.unwrap();

    let all = sorted(repo.find_all().await.unwrap());
    assert_eq!(all, vec![Person::new("a", "Anna"), Person::new("c", "Cid")]);
}

#[tokio::test]
async fn test_datasources_are_isolated() {
    let primary = store(Datasource::Primary).await;
    let secondary = store(Datasource::Secondary).await;

    primary.save(Person::new("X", "Only primary")).await.unwrap();

    assert_eq!(secondary.find_by_id("X").await.unwrap(), None);
    assert!(secondary.find_all().await.unwrap().is_empty());
    assert_eq!(primary.datasource(), Datasource::Primary);
    assert_eq!(secondary.datasource(), Datasource::Secondary);
}

#[tokio::test]
async fn test_unbound_count_is_a_resolution_error() {
    let repo = store(Datasource::Secondary).await;

    let err = repo.person_count_3().await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "No stored routine bound to 'get_person_count_3' on the secondary datasource"
    );
}
