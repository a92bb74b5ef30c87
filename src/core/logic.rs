use crate::core::timeline::{SortOrder, build_timeline};
use crate::core::window::Window;
use crate::db::pool::DbPool;
use crate::db::queries::{load_all_logs, load_logs_between, load_medications};
use crate::errors::AppResult;
use crate::models::timeline::TimelineView;
use chrono::{NaiveDate, TimeZone};

pub struct TimelineLogic;

impl TimelineLogic {
    /// Load medications and the logs inside `window`, then project them into
    /// day schedules. Every call starts from the current contents of the store.
    pub fn view<Tz: TimeZone>(
        pool: &DbPool,
        window: Window,
        tz: &Tz,
        order: SortOrder,
        today: NaiveDate,
    ) -> AppResult<TimelineView> {
        let medications = load_medications(&pool.conn)?;

        let logs = match window.bounds(tz)? {
            Some((start, end)) => load_logs_between(&pool.conn, start, end)?,
            None => load_all_logs(&pool.conn)?,
        };

        let days = build_timeline(&medications, &logs, tz, order);
        let selected_date = window.reference(today);

        Ok(TimelineView {
            medications,
            days,
            selected_date,
            month_label: selected_date.format("%B").to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::init_db;
    use crate::db::queries::{delete_medication, insert_log, insert_medication};
    use crate::models::medication::Medication;
    use crate::models::medication_log::MedicationLog;
    use chrono::Utc;

    fn ms(y: i32, m: u32, d: u32, h: u32) -> i64 {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0)
            .unwrap()
            .timestamp_millis()
    }

    #[test]
    fn view_only_loads_the_selected_month() {
        let pool = DbPool::in_memory().unwrap();
        init_db(&pool.conn).unwrap();
        let a = insert_medication(&pool.conn, &Medication::new("A", "1", "daily")).unwrap();
        insert_log(&pool.conn, &MedicationLog::new(a, ms(2025, 9, 30, 23))).unwrap();
        insert_log(&pool.conn, &MedicationLog::new(a, ms(2025, 10, 1, 0))).unwrap();
        insert_log(&pool.conn, &MedicationLog::new(a, ms(2025, 10, 31, 23))).unwrap();
        insert_log(&pool.conn, &MedicationLog::new(a, ms(2025, 11, 1, 0))).unwrap();

        let today = NaiveDate::from_ymd_opt(2025, 10, 19).unwrap();
        let view = TimelineLogic::view(&pool, Window::Month(today), &Utc, SortOrder::Asc, today)
            .unwrap();

        assert_eq!(view.event_count(), 2);
        assert_eq!(view.month_label, "October");
        assert_eq!(view.days.first().unwrap().day_number, "01");
        assert_eq!(view.days.last().unwrap().day_number, "31");
    }

    #[test]
    fn deleted_medication_disappears_from_next_view() {
        let pool = DbPool::in_memory().unwrap();
        init_db(&pool.conn).unwrap();
        let a = insert_medication(&pool.conn, &Medication::new("A", "1", "daily")).unwrap();
        let b = insert_medication(&pool.conn, &Medication::new("B", "1", "daily")).unwrap();
        insert_log(&pool.conn, &MedicationLog::new(a, ms(2025, 10, 4, 8))).unwrap();
        insert_log(&pool.conn, &MedicationLog::new(b, ms(2025, 10, 4, 9))).unwrap();

        let today = NaiveDate::from_ymd_opt(2025, 10, 4).unwrap();
        delete_medication(&pool.conn, a).unwrap();

        let view = TimelineLogic::view(&pool, Window::All, &Utc, SortOrder::Asc, today).unwrap();
        assert_eq!(view.event_count(), 1);
        assert_eq!(view.days[0].events[0].medication.name, "B");
        assert_eq!(view.medications.len(), 1);
    }
}
