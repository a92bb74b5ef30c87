// src/export/model.rs

use crate::models::timeline::DaySchedule;
use crate::utils::date::format_millis;
use serde::Serialize;

/// Flat row for exporting timeline events (one per logged dose).
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct DoseExport {
    pub log_id: i64,
    pub date: String,
    pub time: String,
    pub timestamp: i64,
    pub medication_id: i64,
    pub medication: String,
    pub dosage: String,
    pub frequency: String,
    pub dose_number: usize,
    pub total_doses: usize,
}

/// Flatten day schedules into export rows, keeping their order.
pub(crate) fn rows_from_days(days: &[DaySchedule]) -> Vec<DoseExport> {
    days.iter()
        .flat_map(|day| {
            day.events.iter().map(move |e| DoseExport {
                log_id: e.log_id,
                date: day.date.format("%Y-%m-%d").to_string(),
                time: format_millis(e.timestamp, "%H:%M"),
                timestamp: e.timestamp,
                medication_id: e.medication.id,
                medication: e.medication.name.clone(),
                dosage: e.medication.dosage.clone(),
                frequency: e.medication.frequency.clone(),
                dose_number: e.dose_number,
                total_doses: e.total_doses,
            })
        })
        .collect()
}
