use diesel::{Connection, SqliteConnection, connection::SimpleConnection};
use diesel_migrations::MigrationHarness;

use crate::MIGRATIONS;

mod registry_workload;

/// Fresh in-memory database with the schema applied and foreign key
/// enforcement switched on, matching what the pool customizer does to real
/// connections.
pub fn test_conn() -> SqliteConnection {
    let mut conn = SqliteConnection::establish(":memory:").unwrap();
    conn.batch_execute("PRAGMA foreign_keys = ON;").unwrap();
    conn.run_pending_migrations(MIGRATIONS).unwrap();
    conn
}
