use serde::Serialize;

/// A dose recorded as taken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MedicationLog {
    pub id: i64,
    pub medication_id: i64,
    pub timestamp: i64, // epoch milliseconds
}

impl MedicationLog {
    pub fn new(medication_id: i64, timestamp: i64) -> Self {
        Self {
            id: 0,
            medication_id,
            timestamp,
        }
    }
}
