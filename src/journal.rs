//! Health journal: input validation and recording on top of the
//! `journal_entries` repository.

use chrono::Utc;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::db::{self, DatabaseError};
use crate::models::enums::{Mood, SeverityBand};
use crate::models::JournalEntry;

pub const SEVERITY_MIN: u8 = 1;
pub const SEVERITY_MAX: u8 = 10;

/// Longest free-text field accepted from clients.
const MAX_TEXT_LEN: usize = 4000;

#[derive(Error, Debug)]
pub enum JournalError {
    #[error("{0}")]
    Invalid(String),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

/// Input for recording a new journal entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewJournalEntry {
    pub user_id: String,
    pub symptoms: String,
    pub severity: u8,
    #[serde(default = "default_mood")]
    pub mood: Mood,
    #[serde(default)]
    pub notes: Option<String>,
}

fn default_mood() -> Mood {
    Mood::Neutral
}

/// Entry with its display band, as returned to clients.
#[derive(Debug, Clone, Serialize)]
pub struct JournalEntryView {
    #[serde(flatten)]
    pub entry: JournalEntry,
    pub severity_band: SeverityBand,
}

impl From<JournalEntry> for JournalEntryView {
    fn from(entry: JournalEntry) -> Self {
        let severity_band = entry.severity_band();
        Self {
            entry,
            severity_band,
        }
    }
}

pub fn validate(entry: &NewJournalEntry) -> Result<(), JournalError> {
    if entry.user_id.trim().is_empty() {
        return Err(JournalError::Invalid("user_id is required".into()));
    }
    if entry.symptoms.trim().is_empty() {
        return Err(JournalError::Invalid("Symptoms are required".into()));
    }
    if !(SEVERITY_MIN..=SEVERITY_MAX).contains(&entry.severity) {
        return Err(JournalError::Invalid(format!(
            "Severity must be between {SEVERITY_MIN} and {SEVERITY_MAX}"
        )));
    }
    let notes_len = entry.notes.as_deref().map_or(0, |n| n.chars().count());
    if entry.symptoms.chars().count() > MAX_TEXT_LEN || notes_len > MAX_TEXT_LEN {
        return Err(JournalError::Invalid(format!(
            "Text fields are limited to {MAX_TEXT_LEN} characters"
        )));
    }
    Ok(())
}

/// Validates and stores a new entry. Blank notes are stored as `None`.
pub fn record_entry(conn: &Connection, input: NewJournalEntry) -> Result<JournalEntry, JournalError> {
    validate(&input)?;

    let entry = JournalEntry {
        id: Uuid::new_v4(),
        user_id: input.user_id.trim().to_string(),
        symptoms: input.symptoms.trim().to_string(),
        severity: input.severity,
        mood: input.mood,
        notes: input
            .notes
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty()),
        created_at: Utc::now(),
    };
    db::insert_journal_entry(conn, &entry)?;

    tracing::info!(entry_id = %entry.id, severity = entry.severity, "Journal entry recorded");
    Ok(entry)
}

pub fn list_entries(conn: &Connection, user_id: &str) -> Result<Vec<JournalEntryView>, JournalError> {
    let entries = db::list_journal_entries_for_user(conn, user_id)?;
    Ok(entries.into_iter().map(JournalEntryView::from).collect())
}
