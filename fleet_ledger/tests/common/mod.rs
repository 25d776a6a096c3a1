#![allow(dead_code)]

use chrono::NaiveDate;
use diesel::QueryableByName;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Integer, Text};
use fleet_ledger::db::{connection, migrate};
use fleet_ledger::models::{NewDriver, NewRoute, NewTruck, NewWarehouse};
use fleet_ledger::schema::{drivers, routes, trucks, warehouses};
use fleet_ledger::status::TruckStatus;
use std::path::PathBuf;
use tempfile::TempDir;

#[derive(QueryableByName)]
struct JournalMode {
    #[diesel(sql_type = Text)]
    journal_mode: String,
}
#[derive(QueryableByName)]
struct ForeignKeys {
    #[diesel(sql_type = Integer)]
    foreign_keys: i32,
}
#[derive(QueryableByName)]
struct BusyTimeout {
    #[diesel(sql_type = Integer, column_name = "timeout")]
    busy_timeout: i32,
}
#[derive(QueryableByName)]
struct Count {
    #[diesel(sql_type = BigInt)]
    n: i64,
}
#[derive(QueryableByName)]
struct FkViolation {
    #[diesel(sql_type = Text)]
    table: String,
}

pub struct TestDb {
    _dir: TempDir,    // keep alive for the life of the test
    pub path: String, // <tmpdir>/test.db
}

pub fn setup_db() -> (TestDb, SqliteConnection) {
    let dir = TempDir::new().expect("tempdir");
    let mut p = PathBuf::from(dir.path());
    p.push("test.db");
    let path = p.to_string_lossy().to_string();

    migrate::run_all(&path).expect("migrations");

    let conn = connection::connect_sqlite(&path).expect("connect");
    (TestDb { _dir: dir, path }, conn)
}

pub fn assert_sqlite_pragmas(conn: &mut SqliteConnection) {
    use diesel::sql_query;

    let jm: JournalMode = sql_query("PRAGMA journal_mode;").get_result(conn).unwrap();
    assert_eq!(jm.journal_mode.to_lowercase(), "wal"); // WAL is persistent per DB file

    let fk: ForeignKeys = sql_query("PRAGMA foreign_keys;").get_result(conn).unwrap();
    assert_eq!(fk.foreign_keys, 1);

    let bt: BusyTimeout = sql_query("PRAGMA busy_timeout;").get_result(conn).unwrap();
    assert_eq!(bt.busy_timeout, 5000);
}

pub fn fk_check_empty(conn: &mut SqliteConnection) {
    let rows: Vec<FkViolation> = diesel::sql_query("PRAGMA foreign_key_check;")
        .load(conn)
        .unwrap();
    let tables: Vec<_> = rows.iter().map(|r| r.table.as_str()).collect();
    assert!(tables.is_empty(), "foreign key violations in {tables:?}");
}

pub fn count(conn: &mut SqliteConnection, table: &str) -> i64 {
    let c: Count = diesel::sql_query(format!("SELECT COUNT(*) AS n FROM {table}"))
        .get_result(conn)
        .unwrap();
    c.n
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn add_warehouse(conn: &mut SqliteConnection, name: &str) -> i32 {
    diesel::insert_into(warehouses::table)
        .values(&NewWarehouse {
            name,
            password_hash: "hash",
        })
        .returning(warehouses::id)
        .get_result(conn)
        .unwrap()
}

pub fn add_truck(conn: &mut SqliteConnection, registration: &str) -> i32 {
    diesel::insert_into(trucks::table)
        .values(&NewTruck {
            registration,
            registration_date: date(2021, 5, 4),
            status: TruckStatus::Available,
        })
        .returning(trucks::id)
        .get_result(conn)
        .unwrap()
}

pub fn add_driver(conn: &mut SqliteConnection, first_name: &str, last_name: &str) -> i32 {
    diesel::insert_into(drivers::table)
        .values(&NewDriver {
            first_name,
            last_name,
        })
        .returning(drivers::id)
        .get_result(conn)
        .unwrap()
}

pub fn add_route(conn: &mut SqliteConnection, description: &str) -> i32 {
    diesel::insert_into(routes::table)
        .values(&NewRoute { description })
        .returning(routes::id)
        .get_result(conn)
        .unwrap()
}
