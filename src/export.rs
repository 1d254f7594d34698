//! Health data export: JSON bundle and Markdown report of a user's scans
//! and journal entries.

use chrono::{DateTime, Utc};
use rusqlite::Connection;
use serde::Serialize;

use crate::analysis::classify::confidence_percent;
use crate::db::{self, DatabaseError};
use crate::models::{JournalEntry, StoredScan};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Serialize)]
pub struct HealthDataExport {
    pub user_id: String,
    pub scan_history: Vec<StoredScan>,
    pub journal_entries: Vec<JournalEntry>,
    pub exported_at: DateTime<Utc>,
}

/// Gather everything stored for `user_id`, newest first.
pub fn collect(conn: &Connection, user_id: &str) -> Result<HealthDataExport, DatabaseError> {
    let scan_history = db::list_scans_for_user(conn, user_id)?;
    let journal_entries = db::list_journal_entries_for_user(conn, user_id)?;

    tracing::info!(
        scans = scan_history.len(),
        journal_entries = journal_entries.len(),
        "Health data collected for export"
    );

    Ok(HealthDataExport {
        user_id: user_id.to_string(),
        scan_history,
        journal_entries,
        exported_at: Utc::now(),
    })
}

/// Render the export as a Markdown report.
pub fn generate_health_report(data: &HealthDataExport) -> String {
    let mut report = String::from("# EchoRemedy Health Data Report\n");
    report.push_str(&format!(
        "**Export Date:** {}\n",
        data.exported_at.format(DATE_FORMAT)
    ));
    report.push_str(&format!("**User:** {}\n\n", data.user_id));

    report.push_str("## Summary\n");
    report.push_str(&format!("- **Total Scans:** {}\n", data.scan_history.len()));
    report.push_str(&format!(
        "- **Journal Entries:** {}\n\n",
        data.journal_entries.len()
    ));

    report.push_str(&format!(
        "## Scan History ({} records)\n",
        data.scan_history.len()
    ));
    for (index, scan) in data.scan_history.iter().enumerate() {
        push_scan(&mut report, index + 1, scan);
    }

    report.push_str(&format!(
        "\n## Journal Entries ({} records)\n",
        data.journal_entries.len()
    ));
    for (index, entry) in data.journal_entries.iter().enumerate() {
        push_journal_entry(&mut report, index + 1, entry);
    }

    report
}

fn push_scan(report: &mut String, number: usize, scan: &StoredScan) {
    let result = &scan.result;
    report.push_str(&format!(
        "\n### Scan #{number} - {}\n",
        result.generated_at.format(DATE_FORMAT)
    ));
    report.push_str(&format!("- **Classification:** {}\n", result.condition));
    report.push_str(&format!(
        "- **Confidence Score:** {}%\n",
        confidence_percent(result.confidence)
    ));
    report.push_str(&format!("- **Urgency Level:** {}\n", result.urgency));
    report.push_str(&format!(
        "- **Description:** {}\n",
        result.symptom_description
    ));

    if !result.home_remedies.is_empty() {
        report.push_str("- **Home Remedies:**\n");
        for remedy in &result.home_remedies {
            report.push_str(&format!("  - {remedy}\n"));
        }
    }

    if !result.medications.is_empty() {
        report.push_str("- **Medications:**\n");
        for medication in &result.medications {
            report.push_str(&format!("  - {}\n", medication.summary_line()));
        }
    }
}

fn push_journal_entry(report: &mut String, number: usize, entry: &JournalEntry) {
    report.push_str(&format!(
        "\n### Entry #{number} - {}\n",
        entry.created_at.format(DATE_FORMAT)
    ));
    report.push_str(&format!("- **Mood:** {}\n", entry.mood));
    report.push_str(&format!("- **Severity:** {}/10\n", entry.severity));
    report.push_str(&format!("- **Symptoms:** {}\n", entry.symptoms));
    report.push_str(&format!(
        "- **Notes:** {}\n",
        entry.notes.as_deref().unwrap_or("None")
    ));
}
