use gc_database::{Database, DatabaseError, Migration};

const ITEMS_V1: Migration = Migration::new(
    "demo",
    "0001",
    "DEFINE TABLE IF NOT EXISTS item SCHEMAFULL;
     DEFINE FIELD IF NOT EXISTS name ON item TYPE string;",
);

async fn count_migrations(db: &Database) -> usize {
    let mut response = db.query("SELECT VALUE slice FROM migration").await.unwrap();
    response.take::<Vec<String>>(0).unwrap().len()
}

#[tokio::test]
async fn connect_in_memory_and_health_check() {
    let db = Database::builder()
        .url("mem://")
        .session("test_ns", "test_db")
        .init()
        .await
        .expect("connect to mem://");

    db.health().await.expect("health check");
    assert_eq!(db.namespace(), "test_ns");
    assert_eq!(db.database(), "test_db");
}

#[tokio::test]
async fn missing_parameters_fail_validation() {
    let err = Database::builder().init().await.unwrap_err();
    assert!(matches!(err, DatabaseError::Validation { .. }));
}

#[tokio::test]
async fn migrations_are_applied_and_recorded() {
    let db = Database::builder()
        .url("mem://")
        .session("test_ns", "migrations")
        .migration(ITEMS_V1)
        .init()
        .await
        .expect("init with migration");

    assert_eq!(count_migrations(&db).await, 1);

    db.query("CREATE item CONTENT { name: 'lanyard' }")
        .await
        .unwrap()
        .check()
        .expect("schema accepts valid row");
}

#[tokio::test]
async fn broken_migration_fails_init() {
    let err = Database::builder()
        .url("mem://")
        .session("test_ns", "broken")
        .migration(Migration::new("demo", "0001", "THIS IS NOT SURREALQL;"))
        .init()
        .await
        .unwrap_err();

    assert!(matches!(err, DatabaseError::Surreal { .. }), "unexpected error: {err}");
}
