use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::db::queries::{
    delete_log, get_log_by_id, get_medication, insert_log, load_logs_for_medication,
};
use crate::errors::{AppError, AppResult};
use crate::models::medication_log::MedicationLog;
use crate::utils::date::format_millis;

/// Business logic for logging and removing doses.
pub struct DoseLogic;

impl DoseLogic {
    /// Record a dose of `medication_id` taken at `timestamp` (epoch ms).
    pub fn take(pool: &DbPool, medication_id: i64, timestamp: i64) -> AppResult<i64> {
        let med = get_medication(&pool.conn, medication_id)?
            .ok_or(AppError::MedicationNotFound(medication_id))?;

        let id = insert_log(&pool.conn, &MedicationLog::new(medication_id, timestamp))?;

        ttlog_quiet(
            &pool.conn,
            "take",
            &format!("#{medication_id}"),
            &format!(
                "Dose of {} at {} (log #{id})",
                med.label(),
                format_millis(timestamp, "%Y-%m-%d %H:%M")
            ),
        );
        Ok(id)
    }

    /// Delete one dose log. An unknown id is a no-op and returns `false`.
    pub fn delete(pool: &DbPool, log_id: i64) -> AppResult<bool> {
        let Some(log) = get_log_by_id(&pool.conn, log_id)? else {
            return Ok(false);
        };

        delete_log(&pool.conn, log.id)?;

        ttlog_quiet(
            &pool.conn,
            "del_dose",
            &format!("#{}", log.medication_id),
            &format!(
                "Deleted dose log #{} taken at {}",
                log.id,
                format_millis(log.timestamp, "%Y-%m-%d %H:%M")
            ),
        );
        Ok(true)
    }

    /// Dose history for one medication, newest first.
    pub fn history(pool: &DbPool, medication_id: i64) -> AppResult<Vec<MedicationLog>> {
        if get_medication(&pool.conn, medication_id)?.is_none() {
            return Err(AppError::MedicationNotFound(medication_id));
        }
        load_logs_for_medication(&pool.conn, medication_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::medication::MedicationLogic;
    use crate::db::initialize::init_db;
    use crate::db::queries::load_all_logs;

    fn pool() -> DbPool {
        let pool = DbPool::in_memory().unwrap();
        init_db(&pool.conn).unwrap();
        pool
    }

    #[test]
    fn take_requires_an_existing_medication() {
        let pool = pool();
        assert!(matches!(
            DoseLogic::take(&pool, 3, 1_000),
            Err(AppError::MedicationNotFound(3))
        ));

        let id = MedicationLogic::add(&pool, "Aspirin", "100 mg", "daily").unwrap();
        let log_id = DoseLogic::take(&pool, id, 1_000).unwrap();
        let logs = load_all_logs(&pool.conn).unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].id, log_id);
        assert_eq!(logs[0].timestamp, 1_000);
    }

    #[test]
    fn deleting_unknown_log_is_a_noop() {
        let pool = pool();
        let id = MedicationLogic::add(&pool, "Aspirin", "100 mg", "daily").unwrap();
        DoseLogic::take(&pool, id, 1_000).unwrap();

        assert!(!DoseLogic::delete(&pool, 999).unwrap());
        assert_eq!(load_all_logs(&pool.conn).unwrap().len(), 1);
    }

    #[test]
    fn deleting_a_dose_leaves_the_others_untouched() {
        let pool = pool();
        let id = MedicationLogic::add(&pool, "Aspirin", "100 mg", "daily").unwrap();
        let first = DoseLogic::take(&pool, id, 8 * 3_600_000).unwrap();
        let second = DoseLogic::take(&pool, id, 8 * 3_600_000 + 300_000).unwrap();
        let third = DoseLogic::take(&pool, id, 20 * 3_600_000).unwrap();

        assert!(DoseLogic::delete(&pool, second).unwrap());

        let history = DoseLogic::history(&pool, id).unwrap();
        let ids: Vec<i64> = history.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![third, first]);
    }
}
