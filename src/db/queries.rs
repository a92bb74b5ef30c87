use crate::errors::AppResult;
use crate::models::medication::Medication;
use crate::models::medication_log::MedicationLog;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

// ---------------------------------------------------------------------------
// Row mappers
// ---------------------------------------------------------------------------

pub fn map_medication(row: &Row) -> Result<Medication> {
    Ok(Medication {
        id: row.get("id")?,
        name: row.get("name")?,
        dosage: row.get("dosage")?,
        frequency: row.get("frequency")?,
    })
}

pub fn map_log(row: &Row) -> Result<MedicationLog> {
    Ok(MedicationLog {
        id: row.get("id")?,
        medication_id: row.get("medication_id")?,
        timestamp: row.get("timestamp")?,
    })
}

// ---------------------------------------------------------------------------
// medications
// ---------------------------------------------------------------------------

pub fn load_medications(conn: &Connection) -> AppResult<Vec<Medication>> {
    let mut stmt = conn.prepare_cached("SELECT * FROM medications ORDER BY id ASC")?;
    let rows = stmt.query_map([], map_medication)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn get_medication(conn: &Connection, id: i64) -> AppResult<Option<Medication>> {
    let med = conn
        .query_row(
            "SELECT * FROM medications WHERE id = ?1",
            [id],
            map_medication,
        )
        .optional()?;
    Ok(med)
}

/// Insert a new medication and return the generated id.
pub fn insert_medication(conn: &Connection, med: &Medication) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO medications (name, dosage, frequency) VALUES (?1, ?2, ?3)",
        params![med.name, med.dosage, med.frequency],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Update name/dosage/frequency in place. Returns false if the id is unknown.
pub fn update_medication(conn: &Connection, med: &Medication) -> AppResult<bool> {
    let n = conn.execute(
        "UPDATE medications
         SET name = ?1, dosage = ?2, frequency = ?3
         WHERE id = ?4",
        params![med.name, med.dosage, med.frequency, med.id],
    )?;
    Ok(n > 0)
}

/// Delete a medication; its logs go with it through the foreign key.
/// Returns the number of deleted medication rows (0 or 1).
pub fn delete_medication(conn: &Connection, id: i64) -> AppResult<usize> {
    let n = conn.execute("DELETE FROM medications WHERE id = ?1", [id])?;
    Ok(n)
}

// ---------------------------------------------------------------------------
// medication_logs
// ---------------------------------------------------------------------------

/// Insert a dose log and return the generated id.
pub fn insert_log(conn: &Connection, log: &MedicationLog) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO medication_logs (medication_id, timestamp) VALUES (?1, ?2)",
        params![log.medication_id, log.timestamp],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_log_by_id(conn: &Connection, id: i64) -> AppResult<Option<MedicationLog>> {
    let log = conn
        .query_row(
            "SELECT * FROM medication_logs WHERE id = ?1",
            [id],
            map_log,
        )
        .optional()?;
    Ok(log)
}

pub fn delete_log(conn: &Connection, id: i64) -> AppResult<usize> {
    let n = conn.execute("DELETE FROM medication_logs WHERE id = ?1", [id])?;
    Ok(n)
}

/// Dose history of one medication, newest first.
pub fn load_logs_for_medication(conn: &Connection, medication_id: i64) -> AppResult<Vec<MedicationLog>> {
    let mut stmt = conn.prepare_cached(
        "SELECT * FROM medication_logs
         WHERE medication_id = ?1
         ORDER BY timestamp DESC, id DESC",
    )?;
    collect_logs(stmt.query_map([medication_id], map_log)?)
}

/// Logs with `start <= timestamp <= end` (both bounds inclusive, epoch ms).
pub fn load_logs_between(conn: &Connection, start: i64, end: i64) -> AppResult<Vec<MedicationLog>> {
    let mut stmt = conn.prepare_cached(
        "SELECT * FROM medication_logs
         WHERE timestamp BETWEEN ?1 AND ?2
         ORDER BY timestamp ASC, id ASC",
    )?;
    collect_logs(stmt.query_map([start, end], map_log)?)
}

pub fn load_all_logs(conn: &Connection) -> AppResult<Vec<MedicationLog>> {
    let mut stmt =
        conn.prepare_cached("SELECT * FROM medication_logs ORDER BY timestamp ASC, id ASC")?;
    collect_logs(stmt.query_map([], map_log)?)
}

pub fn count_logs_for_medication(conn: &Connection, medication_id: i64) -> AppResult<i64> {
    let n = conn.query_row(
        "SELECT COUNT(*) FROM medication_logs WHERE medication_id = ?1",
        [medication_id],
        |r| r.get(0),
    )?;
    Ok(n)
}

fn collect_logs<I>(rows: I) -> AppResult<Vec<MedicationLog>>
where
    I: Iterator<Item = Result<MedicationLog>>,
{
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::init_db;
    use crate::db::pool::DbPool;

    fn pool() -> DbPool {
        let pool = DbPool::in_memory().unwrap();
        init_db(&pool.conn).unwrap();
        pool
    }

    #[test]
    fn insert_and_get_medication() {
        let pool = pool();
        let id = insert_medication(&pool.conn, &Medication::new("Ibuprofen", "200 mg", "Twice a day"))
            .unwrap();

        let med = get_medication(&pool.conn, id).unwrap().unwrap();
        assert_eq!(med.name, "Ibuprofen");
        assert_eq!(med.dosage, "200 mg");
        assert_eq!(med.frequency, "Twice a day");
        assert!(get_medication(&pool.conn, id + 1).unwrap().is_none());
    }

    #[test]
    fn deleting_medication_cascades_to_logs() {
        let pool = pool();
        let a = insert_medication(&pool.conn, &Medication::new("A", "1", "daily")).unwrap();
        let b = insert_medication(&pool.conn, &Medication::new("B", "1", "daily")).unwrap();
        insert_log(&pool.conn, &MedicationLog::new(a, 1_000)).unwrap();
        insert_log(&pool.conn, &MedicationLog::new(a, 2_000)).unwrap();
        insert_log(&pool.conn, &MedicationLog::new(b, 3_000)).unwrap();

        assert_eq!(delete_medication(&pool.conn, a).unwrap(), 1);

        let left = load_all_logs(&pool.conn).unwrap();
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].medication_id, b);
    }

    #[test]
    fn log_for_unknown_medication_is_rejected() {
        let pool = pool();
        assert!(insert_log(&pool.conn, &MedicationLog::new(42, 1_000)).is_err());
    }

    #[test]
    fn logs_between_is_inclusive() {
        let pool = pool();
        let a = insert_medication(&pool.conn, &Medication::new("A", "", "")).unwrap();
        for ts in [99, 100, 150, 200, 201] {
            insert_log(&pool.conn, &MedicationLog::new(a, ts)).unwrap();
        }

        let ts: Vec<i64> = load_logs_between(&pool.conn, 100, 200)
            .unwrap()
            .into_iter()
            .map(|l| l.timestamp)
            .collect();
        assert_eq!(ts, vec![100, 150, 200]);
    }

    #[test]
    fn logs_for_medication_newest_first() {
        let pool = pool();
        let a = insert_medication(&pool.conn, &Medication::new("A", "", "")).unwrap();
        let b = insert_medication(&pool.conn, &Medication::new("B", "", "")).unwrap();
        insert_log(&pool.conn, &MedicationLog::new(a, 10)).unwrap();
        insert_log(&pool.conn, &MedicationLog::new(b, 20)).unwrap();
        insert_log(&pool.conn, &MedicationLog::new(a, 30)).unwrap();

        let ts: Vec<i64> = load_logs_for_medication(&pool.conn, a)
            .unwrap()
            .into_iter()
            .map(|l| l.timestamp)
            .collect();
        assert_eq!(ts, vec![30, 10]);
        assert_eq!(count_logs_for_medication(&pool.conn, a).unwrap(), 2);
    }

    #[test]
    fn update_keeps_logs() {
        let pool = pool();
        let id = insert_medication(&pool.conn, &Medication::new("A", "1", "daily")).unwrap();
        insert_log(&pool.conn, &MedicationLog::new(id, 10)).unwrap();

        let mut med = get_medication(&pool.conn, id).unwrap().unwrap();
        med.dosage = "2".into();
        assert!(update_medication(&pool.conn, &med).unwrap());

        assert_eq!(count_logs_for_medication(&pool.conn, id).unwrap(), 1);
        med.id = 999;
        assert!(!update_medication(&pool.conn, &med).unwrap());
    }
}
