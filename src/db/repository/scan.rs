use std::str::FromStr;

use rusqlite::{params, Connection};
use uuid::Uuid;

use super::{format_timestamp, parse_timestamp, parse_uuid};
use crate::analysis::ScanResult;
use crate::db::DatabaseError;
use crate::models::enums::UrgencyLevel;
use crate::models::StoredScan;

const SCAN_COLUMNS: &str = "id, user_id, image_url, condition, confidence, urgency,
    symptom_description, ai_summary, home_remedies, medications, detailed_analysis,
    similar_images, created_at";

pub fn insert_scan(conn: &Connection, scan: &StoredScan) -> Result<(), DatabaseError> {
    let result = &scan.result;
    conn.execute(
        "INSERT INTO symptom_scans (id, user_id, image_url, condition, confidence, urgency,
         symptom_description, ai_summary, home_remedies, medications, detailed_analysis,
         similar_images, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
        params![
            scan.id.to_string(),
            scan.user_id,
            scan.image_url,
            result.condition,
            result.confidence,
            result.urgency.as_str(),
            result.symptom_description,
            result.ai_summary,
            serde_json::to_string(&result.home_remedies)?,
            serde_json::to_string(&result.medications)?,
            serde_json::to_string(&result.detailed_analysis)?,
            serde_json::to_string(&result.similar_images)?,
            format_timestamp(&result.generated_at),
        ],
    )?;
    Ok(())
}

pub fn get_scan(conn: &Connection, id: &Uuid) -> Result<Option<StoredScan>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {SCAN_COLUMNS} FROM symptom_scans WHERE id = ?1"
    ))?;
    let rows = stmt.query_map(params![id.to_string()], read_scan_row)?;
    Ok(scan_rows_to_vec(rows)?.into_iter().next())
}

/// Scan history for a user, newest first.
pub fn list_scans_for_user(
    conn: &Connection,
    user_id: &str,
) -> Result<Vec<StoredScan>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {SCAN_COLUMNS} FROM symptom_scans WHERE user_id = ?1
         ORDER BY created_at DESC"
    ))?;
    let rows = stmt.query_map(params![user_id], read_scan_row)?;
    scan_rows_to_vec(rows)
}

pub fn delete_scan(conn: &Connection, id: &Uuid) -> Result<(), DatabaseError> {
    let deleted = conn.execute(
        "DELETE FROM symptom_scans WHERE id = ?1",
        params![id.to_string()],
    )?;
    if deleted == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "SymptomScan".into(),
            id: id.to_string(),
        });
    }
    Ok(())
}

type ScanRow = (
    String, String, Option<String>, String, f64, String,
    String, String, String, String, String,
    String, String,
);

fn read_scan_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ScanRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
        row.get(7)?,
        row.get(8)?,
        row.get(9)?,
        row.get(10)?,
        row.get(11)?,
        row.get(12)?,
    ))
}

fn scan_rows_to_vec(
    rows: rusqlite::MappedRows<'_, impl FnMut(&rusqlite::Row<'_>) -> rusqlite::Result<ScanRow>>,
) -> Result<Vec<StoredScan>, DatabaseError> {
    let mut scans = Vec::new();
    for row in rows {
        let (
            id, user_id, image_url, condition, confidence, urgency,
            symptom_description, ai_summary, home_remedies, medications, detailed_analysis,
            similar_images, created_at,
        ) = row?;
        scans.push(StoredScan {
            id: parse_uuid(&id)?,
            user_id,
            image_url,
            result: ScanResult {
                condition,
                confidence,
                symptom_description,
                ai_summary,
                home_remedies: serde_json::from_str(&home_remedies)?,
                medications: serde_json::from_str(&medications)?,
                urgency: UrgencyLevel::from_str(&urgency)?,
                detailed_analysis: serde_json::from_str(&detailed_analysis)?,
                similar_images: serde_json::from_str(&similar_images)?,
                generated_at: parse_timestamp(&created_at)?,
            },
        });
    }
    Ok(scans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;
    use crate::db::sqlite::open_memory_database;
    use chrono::{Duration, Utc};

    fn stored(user_id: &str, file_name: &str) -> StoredScan {
        StoredScan {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            image_url: Some(format!("https://cdn.example.org/{file_name}")),
            result: analyze(b"\x89PNG\r\n\x1a\n", file_name, "https://ref.example"),
        }
    }

    #[test]
    fn insert_and_get_round_trip() {
        let conn = open_memory_database().unwrap();
        let scan = stored("user-1", "elbow.png");
        insert_scan(&conn, &scan).unwrap();

        let fetched = get_scan(&conn, &scan.id).unwrap().expect("scan should exist");
        assert_eq!(fetched.user_id, "user-1");
        assert_eq!(fetched.result.condition, scan.result.condition);
        assert_eq!(fetched.result.medications, scan.result.medications);
        assert_eq!(fetched.result.detailed_analysis, scan.result.detailed_analysis);
        assert_eq!(fetched.result.generated_at, scan.result.generated_at);
    }

    #[test]
    fn get_unknown_scan_returns_none() {
        let conn = open_memory_database().unwrap();
        assert!(get_scan(&conn, &Uuid::new_v4()).unwrap().is_none());
    }

    #[test]
    fn history_is_per_user_and_newest_first() {
        let conn = open_memory_database().unwrap();
        let mut older = stored("user-1", "a.png");
        older.result.generated_at = Utc::now() - Duration::days(2);
        let newer = stored("user-1", "b.png");
        let other = stored("user-2", "c.png");
        insert_scan(&conn, &older).unwrap();
        insert_scan(&conn, &newer).unwrap();
        insert_scan(&conn, &other).unwrap();

        let history = list_scans_for_user(&conn, "user-1").unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].id, newer.id);
        assert_eq!(history[1].id, older.id);
    }

    #[test]
    fn delete_removes_scan() {
        let conn = open_memory_database().unwrap();
        let scan = stored("user-1", "a.png");
        insert_scan(&conn, &scan).unwrap();
        delete_scan(&conn, &scan.id).unwrap();
        assert!(get_scan(&conn, &scan.id).unwrap().is_none());
    }

    #[test]
    fn delete_unknown_scan_is_not_found() {
        let conn = open_memory_database().unwrap();
        let err = delete_scan(&conn, &Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, DatabaseError::NotFound { .. }));
    }
}
