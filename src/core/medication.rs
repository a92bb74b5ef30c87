use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::db::queries::{
    count_logs_for_medication, delete_medication, get_medication, insert_medication,
    load_medications, update_medication,
};
use crate::errors::{AppError, AppResult};
use crate::models::medication::Medication;

/// High-level business logic for the `med` subcommands.
pub struct MedicationLogic;

/// Fields to change in `med edit`; `None` keeps the stored value.
#[derive(Debug, Default, Clone)]
pub struct MedicationPatch {
    pub name: Option<String>,
    pub dosage: Option<String>,
    pub frequency: Option<String>,
}

impl MedicationLogic {
    pub fn add(pool: &DbPool, name: &str, dosage: &str, frequency: &str) -> AppResult<i64> {
        let med = Medication::new(name, dosage, frequency);
        if med.name.is_empty() {
            return Err(AppError::EmptyField("name".into()));
        }

        let id = insert_medication(&pool.conn, &med)?;
        ttlog_quiet(
            &pool.conn,
            "add_med",
            &format!("#{id}"),
            &format!("Added {} [{}]", med.label(), med.frequency),
        );
        Ok(id)
    }

    pub fn list(pool: &DbPool) -> AppResult<Vec<Medication>> {
        load_medications(&pool.conn)
    }

    pub fn get(pool: &DbPool, id: i64) -> AppResult<Medication> {
        get_medication(&pool.conn, id)?.ok_or(AppError::MedicationNotFound(id))
    }

    /// Update in place. Logs keep pointing at the same row.
    pub fn edit(pool: &DbPool, id: i64, patch: MedicationPatch) -> AppResult<Medication> {
        let mut med = Self::get(pool, id)?;

        if let Some(name) = patch.name {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(AppError::EmptyField("name".into()));
            }
            med.name = name;
        }
        if let Some(dosage) = patch.dosage {
            med.dosage = dosage.trim().to_string();
        }
        if let Some(frequency) = patch.frequency {
            med.frequency = frequency.trim().to_string();
        }

        if !update_medication(&pool.conn, &med)? {
            return Err(AppError::MedicationNotFound(id));
        }

        ttlog_quiet(
            &pool.conn,
            "edit_med",
            &format!("#{id}"),
            &format!("Updated to {} [{}]", med.label(), med.frequency),
        );
        Ok(med)
    }

    /// Delete a medication and, through the cascade, all of its logs.
    /// Returns the removed medication and how many logs went with it.
    pub fn delete(pool: &DbPool, id: i64) -> AppResult<(Medication, i64)> {
        let med = Self::get(pool, id)?;

        let removed_logs = count_logs_for_medication(&pool.conn, id)?;
        if delete_medication(&pool.conn, id)? == 0 {
            return Err(AppError::MedicationNotFound(id));
        }

        ttlog_quiet(
            &pool.conn,
            "del_med",
            &format!("#{id}"),
            &format!("Deleted {} and {} dose log(s)", med.label(), removed_logs),
        );
        Ok((med, removed_logs))
    }

    pub fn dose_count(pool: &DbPool, id: i64) -> AppResult<i64> {
        count_logs_for_medication(&pool.conn, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::init_db;
    use crate::db::log::load_log;
    use crate::db::queries::{insert_log, load_all_logs};
    use crate::models::medication_log::MedicationLog;

    fn pool() -> DbPool {
        let pool = DbPool::in_memory().unwrap();
        init_db(&pool.conn).unwrap();
        pool
    }

    #[test]
    fn add_trims_and_rejects_empty_name() {
        let pool = pool();
        let id = MedicationLogic::add(&pool, "  Aspirin ", " 100 mg", "Once a day ").unwrap();
        let med = MedicationLogic::get(&pool, id).unwrap();
        assert_eq!(med.name, "Aspirin");
        assert_eq!(med.dosage, "100 mg");
        assert_eq!(med.frequency, "Once a day");

        assert!(matches!(
            MedicationLogic::add(&pool, "   ", "1", "daily"),
            Err(AppError::EmptyField(_))
        ));
    }

    #[test]
    fn delete_reports_cascaded_logs_and_writes_audit_line() {
        let pool = pool();
        let id = MedicationLogic::add(&pool, "Aspirin", "100 mg", "daily").unwrap();
        insert_log(&pool.conn, &MedicationLog::new(id, 1)).unwrap();
        insert_log(&pool.conn, &MedicationLog::new(id, 2)).unwrap();

        let (med, removed) = MedicationLogic::delete(&pool, id).unwrap();
        assert_eq!(med.name, "Aspirin");
        assert_eq!(removed, 2);
        assert!(load_all_logs(&pool.conn).unwrap().is_empty());

        let ops: Vec<String> = load_log(&pool.conn)
            .unwrap()
            .into_iter()
            .map(|e| e.operation)
            .collect();
        assert!(ops.contains(&"add_med".to_string()));
        assert!(ops.contains(&"del_med".to_string()));
    }

    #[test]
    fn unknown_medication_is_an_error() {
        let pool = pool();
        assert!(matches!(
            MedicationLogic::delete(&pool, 7),
            Err(AppError::MedicationNotFound(7))
        ));
        assert!(matches!(
            MedicationLogic::edit(&pool, 7, MedicationPatch::default()),
            Err(AppError::MedicationNotFound(7))
        ));
    }

    #[test]
    fn edit_changes_only_given_fields() {
        let pool = pool();
        let id = MedicationLogic::add(&pool, "Aspirin", "100 mg", "daily").unwrap();
        insert_log(&pool.conn, &MedicationLog::new(id, 1)).unwrap();

        let patch = MedicationPatch {
            dosage: Some("300 mg".into()),
            ..Default::default()
        };
        let med = MedicationLogic::edit(&pool, id, patch).unwrap();
        assert_eq!(med.name, "Aspirin");
        assert_eq!(med.dosage, "300 mg");
        assert_eq!(MedicationLogic::dose_count(&pool, id).unwrap(), 1);
    }
}
