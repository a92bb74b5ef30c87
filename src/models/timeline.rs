use super::medication::Medication;
use chrono::NaiveDate;
use serde::Serialize;

/// A logged dose joined to its medication, with its rank among the same
/// medication's doses on the same calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineEvent {
    pub log_id: i64,
    pub medication: Medication,
    pub timestamp: i64,
    pub dose_number: usize, // 1-based
    pub total_doses: usize,
}

/// All events of one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DaySchedule {
    pub date: NaiveDate,
    pub day_start: i64, // epoch ms of local midnight
    pub day_number: String,  // "04"
    pub month_short: String, // "OCT"
    pub events: Vec<TimelineEvent>,
}

/// Everything the timeline screen renders.
#[derive(Debug, Clone, Serialize)]
pub struct TimelineView {
    pub medications: Vec<Medication>,
    pub days: Vec<DaySchedule>,
    pub selected_date: NaiveDate,
    pub month_label: String, // "October"
}

impl TimelineView {
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn event_count(&self) -> usize {
        self.days.iter().map(|d| d.events.len()).sum()
    }
}
