use serde::{Deserialize, Serialize};

/// Over-the-counter medication suggestion attached to a remedy record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicationSuggestion {
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub precautions: String,
}

impl MedicationSuggestion {
    pub fn new(name: &str, dosage: &str, frequency: &str, precautions: &str) -> Self {
        Self {
            name: name.to_string(),
            dosage: dosage.to_string(),
            frequency: frequency.to_string(),
            precautions: precautions.to_string(),
        }
    }

    /// `name: dosage (frequency)` as shown in exported reports.
    pub fn summary_line(&self) -> String {
        format!("{}: {} ({})", self.name, self.dosage, self.frequency)
    }
}
