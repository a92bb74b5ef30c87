use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Medication {
    pub id: i64,           // ⇔ medications.id (generated)
    pub name: String,      // ⇔ medications.name
    pub dosage: String,    // ⇔ medications.dosage, free text ("500 mg")
    pub frequency: String, // ⇔ medications.frequency, free text ("Twice a day")
}

impl Medication {
    /// Medication not yet stored: id 0 means "let SQLite generate it".
    pub fn new(name: &str, dosage: &str, frequency: &str) -> Self {
        Self {
            id: 0,
            name: name.trim().to_string(),
            dosage: dosage.trim().to_string(),
            frequency: frequency.trim().to_string(),
        }
    }

    /// "Ibuprofen (200 mg)" or just the name when no dosage is set.
    pub fn label(&self) -> String {
        if self.dosage.is_empty() {
            self.name.clone()
        } else {
            format!("{} ({})", self.name, self.dosage)
        }
    }
}
