use mechanic_shop_core::db::migrations::latest_version;
use mechanic_shop_core::db::{open_db, open_db_in_memory, DbError};
use rusqlite::Connection;

const SHOP_TABLES: [&str; 6] = [
    "Customer",
    "Mechanic",
    "Car",
    "Owns",
    "Service_Request",
    "Closed_Request",
];

#[test]
fn open_db_in_memory_creates_shop_schema() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    for table in SHOP_TABLES {
        assert_table_exists(&conn, table);
    }
}

#[test]
fn reopening_file_database_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shop.db");

    let first = open_db(&path).unwrap();
    first
        .execute_batch("INSERT INTO Car (vin, make, model, year) VALUES ('V1', 'Ford', 'Escort', 1990);")
        .unwrap();
    drop(first);

    let second = open_db(&path).unwrap();
    assert_eq!(schema_version(&second), latest_version());
    let cars: i64 = second
        .query_row("SELECT COUNT(*) FROM Car;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(cars, 1);
}

#[test]
fn newer_schema_version_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn foreign_keys_are_enforced() {
    let conn = open_db_in_memory().unwrap();
    let err = conn
        .execute_batch("INSERT INTO Owns (ownership_id, customer_id, car_vin) VALUES (1, 1, 'nope');")
        .unwrap_err();
    assert!(err.to_string().contains("FOREIGN KEY"));
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
