use std::str::FromStr;

use rusqlite::{params, Connection};
use uuid::Uuid;

use super::{format_timestamp, parse_timestamp, parse_uuid};
use crate::db::DatabaseError;
use crate::models::enums::Mood;
use crate::models::JournalEntry;

pub fn insert_journal_entry(conn: &Connection, entry: &JournalEntry) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO journal_entries (id, user_id, symptoms, severity, mood, notes, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            entry.id.to_string(),
            entry.user_id,
            entry.symptoms,
            i32::from(entry.severity),
            entry.mood.as_str(),
            entry.notes,
            format_timestamp(&entry.created_at),
        ],
    )?;
    Ok(())
}

/// Journal entries for a user, newest first.
pub fn list_journal_entries_for_user(
    conn: &Connection,
    user_id: &str,
) -> Result<Vec<JournalEntry>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, symptoms, severity, mood, notes, created_at
         FROM journal_entries WHERE user_id = ?1 ORDER BY created_at DESC",
    )?;

    let rows = stmt.query_map(params![user_id], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, i32>(3)?,
            row.get::<_, String>(4)?,
            row.get::<_, Option<String>>(5)?,
            row.get::<_, String>(6)?,
        ))
    })?;

    let mut entries = Vec::new();
    for row in rows {
        let (id, user_id, symptoms, severity, mood, notes, created_at) = row?;
        entries.push(JournalEntry {
            id: parse_uuid(&id)?,
            user_id,
            symptoms,
            severity: u8::try_from(severity).map_err(|_| {
                DatabaseError::ConstraintViolation(format!("severity out of range: {severity}"))
            })?,
            mood: Mood::from_str(&mood)?,
            notes,
            created_at: parse_timestamp(&created_at)?,
        });
    }
    Ok(entries)
}

/// Hard-deletes a journal entry.
pub fn delete_journal_entry(conn: &Connection, id: &Uuid) -> Result<(), DatabaseError> {
    let deleted = conn.execute(
        "DELETE FROM journal_entries WHERE id = ?1",
        params![id.to_string()],
    )?;
    if deleted == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "JournalEntry".into(),
            id: id.to_string(),
        });
    }
    Ok(())
}
