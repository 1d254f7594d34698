use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{Mood, SeverityBand};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: Uuid,
    pub user_id: String,
    pub symptoms: String,
    pub severity: u8,
    pub mood: Mood,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl JournalEntry {
    pub fn severity_band(&self) -> SeverityBand {
        SeverityBand::from_score(self.severity)
    }
}
