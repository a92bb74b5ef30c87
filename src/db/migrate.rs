use crate::core::backup::zip_file;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, Result};
use std::path::Path;

/// One schema step. Applied steps are recorded in the `log` table with
/// operation `migration_applied` and the version as target.
struct Migration {
    version: &'static str,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20251001_0001_create_medications",
        description: "Created medications table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS medications (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            name       TEXT NOT NULL,
            dosage     TEXT NOT NULL DEFAULT '',
            frequency  TEXT NOT NULL DEFAULT ''
        );
        "#,
    },
    Migration {
        version: "20251001_0002_create_medication_logs",
        description: "Created medication_logs table (cascade on medication delete)",
        sql: r#"
        CREATE TABLE IF NOT EXISTS medication_logs (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            medication_id  INTEGER NOT NULL
                           REFERENCES medications(id) ON DELETE CASCADE,
            timestamp      INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_medication_logs_medication_id
            ON medication_logs(medication_id);
        "#,
    },
    Migration {
        version: "20251015_0003_index_log_timestamp",
        description: "Indexed medication_logs by timestamp",
        sql: r#"
        CREATE INDEX IF NOT EXISTS idx_medication_logs_timestamp
            ON medication_logs(timestamp);
        "#,
    },
];

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

/// Versions already applied to this database, oldest first.
pub fn applied_migrations(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT target FROM log WHERE operation = 'migration_applied' ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
    rows.collect()
}

fn apply(conn: &Connection, m: &Migration) -> AppResult<()> {
    let tx = conn.unchecked_transaction()?;

    tx.execute_batch(m.sql)
        .map_err(|e| AppError::Migration(format!("{}: {}", m.version, e)))?;

    tx.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (?1, 'migration_applied', ?2, ?3)",
        rusqlite::params![Local::now().to_rfc3339(), m.version, m.description],
    )?;

    tx.commit()?;
    Ok(())
}

/// Zip the database file next to itself before touching an existing schema.
fn backup_before_migration(db_path: &str) -> AppResult<()> {
    let src = Path::new(db_path);
    let backup_name = format!(
        "{}-backup_db_pre_migration.zip",
        Local::now().format("%Y%m%d_%H%M%S")
    );
    let dest = match src.parent() {
        Some(dir) => dir.join(backup_name),
        None => return Ok(()),
    };

    zip_file(src, &dest)?;
    success(format!("📦 Backup created: {}", dest.display()));
    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    ensure_log_table(conn)?;

    let mut pending = Vec::new();
    for m in MIGRATIONS {
        if !is_applied(conn, m.version)? {
            pending.push(m);
        }
    }

    if pending.is_empty() {
        return Ok(());
    }

    // An existing medications table means there is user data to protect.
    if table_exists(conn, "medications")? {
        warning("Existing schema detected — creating safety backup before migration...");

        let db_path: String = conn
            .query_row("PRAGMA database_list;", [], |row| row.get::<_, String>(2))
            .unwrap_or_default();

        if db_path.is_empty() {
            warning("Could not determine DB path — backup skipped.");
        } else {
            backup_before_migration(&db_path)?;
        }
    }

    for m in pending {
        apply(conn, m)?;
        success(format!("Migration applied: {} → {}", m.version, m.description));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_database_gets_every_migration_once() {
        let conn = Connection::open_in_memory().unwrap();
        run_pending_migrations(&conn).unwrap();
        run_pending_migrations(&conn).unwrap();

        let applied = applied_migrations(&conn).unwrap();
        assert_eq!(applied.len(), MIGRATIONS.len());
        assert_eq!(applied[0], "20251001_0001_create_medications");

        assert!(table_exists(&conn, "medications").unwrap());
        assert!(table_exists(&conn, "medication_logs").unwrap());
    }

    #[test]
    fn missing_step_is_applied_on_next_run() {
        let conn = Connection::open_in_memory().unwrap();
        run_pending_migrations(&conn).unwrap();

        conn.execute(
            "DELETE FROM log WHERE target = '20251015_0003_index_log_timestamp'",
            [],
        )
        .unwrap();
        conn.execute_batch("DROP INDEX idx_medication_logs_timestamp;")
            .unwrap();

        // in-memory DB has no path, so the backup is skipped
        run_pending_migrations(&conn).unwrap();

        let idx: Option<String> = conn
            .query_row(
                "SELECT name FROM sqlite_master WHERE type='index' AND name='idx_medication_logs_timestamp'",
                [],
                |r| r.get(0),
            )
            .optional()
            .unwrap();
        assert!(idx.is_some());
    }
}
