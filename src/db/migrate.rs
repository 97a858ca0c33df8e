//! Schema migration engine.
//!
//! The schema history is a single lineage of numbered versions. Applied
//! versions are recorded as `migration_applied` rows in the `log` table, so
//! every step runs at most once per database file.
//!
//! Each version restates the COMPLETE index set for every collection, not
//! just its delta. The store contract requires it: an index missing from the
//! latest version's definition would silently disappear on a fresh database.

use crate::db::log::{ensure_log_table, record};
use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

const V1_CREATE_COLLECTIONS: &str = "0001_create_collections";
const V2_TRAINING_COMPLETED: &str = "0002_training_completed";

/// Public entry point: run all pending migrations.
///
/// Invoked by db::initialize::init_db() and by `trainstat db --migrate`.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;

    migrate_v1_create_collections(conn)?;
    migrate_v2_training_completed(conn)?;

    Ok(())
}

fn migration_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut stmt = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(stmt.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    record(conn, "migration_applied", version, message)?;
    success(format!("Migration applied: {version}"));
    Ok(())
}

/// v1: the five collections. `trainings` has no `completed` column yet.
fn migrate_v1_create_collections(conn: &Connection) -> Result<()> {
    if migration_applied(conn, V1_CREATE_COLLECTIONS)? {
        return Ok(());
    }

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS members (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            external_id TEXT,
            vorname     TEXT NOT NULL,
            nachname    TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS trainers (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            external_id TEXT,
            vorname     TEXT NOT NULL,
            nachname    TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS trainings (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            external_id TEXT,
            datum       TEXT NOT NULL,
            thema       TEXT NOT NULL,
            trainer1_id INTEGER NOT NULL,
            trainer2_id INTEGER
        );

        CREATE TABLE IF NOT EXISTS attendances (
            training_id INTEGER NOT NULL,
            member_id   INTEGER NOT NULL,
            PRIMARY KEY (training_id, member_id)
        );

        CREATE TABLE IF NOT EXISTS settings (
            key   TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );
        "#,
    )?;

    // v1 index set (no `completed` index yet)
    conn.execute_batch(
        r#"
        CREATE UNIQUE INDEX IF NOT EXISTS idx_members_external_id
            ON members(external_id) WHERE external_id IS NOT NULL;
        CREATE INDEX IF NOT EXISTS idx_members_nachname ON members(nachname);
        CREATE INDEX IF NOT EXISTS idx_members_vorname  ON members(vorname);

        CREATE UNIQUE INDEX IF NOT EXISTS idx_trainers_external_id
            ON trainers(external_id) WHERE external_id IS NOT NULL;
        CREATE INDEX IF NOT EXISTS idx_trainers_nachname ON trainers(nachname);
        CREATE INDEX IF NOT EXISTS idx_trainers_vorname  ON trainers(vorname);

        CREATE UNIQUE INDEX IF NOT EXISTS idx_trainings_external_id
            ON trainings(external_id) WHERE external_id IS NOT NULL;
        CREATE INDEX IF NOT EXISTS idx_trainings_datum       ON trainings(datum);
        CREATE INDEX IF NOT EXISTS idx_trainings_thema       ON trainings(thema);
        CREATE INDEX IF NOT EXISTS idx_trainings_trainer1_id ON trainings(trainer1_id);
        CREATE INDEX IF NOT EXISTS idx_trainings_trainer2_id ON trainings(trainer2_id);

        CREATE INDEX IF NOT EXISTS idx_attendances_training_id ON attendances(training_id);
        CREATE INDEX IF NOT EXISTS idx_attendances_member_id   ON attendances(member_id);
        "#,
    )?;

    mark_applied(conn, V1_CREATE_COLLECTIONS, "Created the five collections")
}

/// v2: adds `trainings.completed` and restates the full index set of every
/// collection, now including the `completed` index.
fn migrate_v2_training_completed(conn: &Connection) -> Result<()> {
    if migration_applied(conn, V2_TRAINING_COMPLETED)? {
        return Ok(());
    }

    if !trainings_has_completed_column(conn)? {
        conn.execute(
            "ALTER TABLE trainings ADD COLUMN completed INTEGER NOT NULL DEFAULT 0;",
            [],
        )?;
    }

    conn.execute_batch(
        r#"
        CREATE UNIQUE INDEX IF NOT EXISTS idx_members_external_id
            ON members(external_id) WHERE external_id IS NOT NULL;
        CREATE INDEX IF NOT EXISTS idx_members_nachname ON members(nachname);
        CREATE INDEX IF NOT EXISTS idx_members_vorname  ON members(vorname);

        CREATE UNIQUE INDEX IF NOT EXISTS idx_trainers_external_id
            ON trainers(external_id) WHERE external_id IS NOT NULL;
        CREATE INDEX IF NOT EXISTS idx_trainers_nachname ON trainers(nachname);
        CREATE INDEX IF NOT EXISTS idx_trainers_vorname  ON trainers(vorname);

        CREATE UNIQUE INDEX IF NOT EXISTS idx_trainings_external_id
            ON trainings(external_id) WHERE external_id IS NOT NULL;
        CREATE INDEX IF NOT EXISTS idx_trainings_datum       ON trainings(datum);
        CREATE INDEX IF NOT EXISTS idx_trainings_thema       ON trainings(thema);
        CREATE INDEX IF NOT EXISTS idx_trainings_trainer1_id ON trainings(trainer1_id);
        CREATE INDEX IF NOT EXISTS idx_trainings_trainer2_id ON trainings(trainer2_id);
        CREATE INDEX IF NOT EXISTS idx_trainings_completed   ON trainings(completed);

        CREATE INDEX IF NOT EXISTS idx_attendances_training_id ON attendances(training_id);
        CREATE INDEX IF NOT EXISTS idx_attendances_member_id   ON attendances(member_id);
        "#,
    )?;

    mark_applied(
        conn,
        V2_TRAINING_COMPLETED,
        "Added completed flag to trainings",
    )
}

fn trainings_has_completed_column(conn: &Connection) -> Result<bool> {
    let mut stmt = conn.prepare("PRAGMA table_info('trainings')")?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == "completed" {
            return Ok(true);
        }
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run_pending_migrations(&conn).unwrap();
        run_pending_migrations(&conn).unwrap();

        let applied: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM log WHERE operation = 'migration_applied'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(applied, 2);
    }

    #[test]
    fn fresh_schema_has_completed_column() {
        let conn = Connection::open_in_memory().unwrap();
        run_pending_migrations(&conn).unwrap();
        assert!(trainings_has_completed_column(&conn).unwrap());
    }

    #[test]
    fn external_id_is_unique_per_collection() {
        let conn = Connection::open_in_memory().unwrap();
        run_pending_migrations(&conn).unwrap();

        conn.execute(
            "INSERT INTO members (external_id, vorname, nachname) VALUES ('M1', 'Anna', 'Adler')",
            [],
        )
        .unwrap();
        let dup = conn.execute(
            "INSERT INTO members (external_id, vorname, nachname) VALUES ('M1', 'Berta', 'Brandt')",
            [],
        );
        assert!(dup.is_err());

        // rows without an external id are unconstrained
        for _ in 0..2 {
            conn.execute(
                "INSERT INTO members (external_id, vorname, nachname) VALUES (NULL, 'Carl', 'Clauss')",
                [],
            )
            .unwrap();
        }
    }
}
