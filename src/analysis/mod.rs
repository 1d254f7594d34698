//! Symptom photo analysis.
//!
//! Pipeline: content digest → condition lookup → remedy record → report.
//! Every step is a pure function over the upload and static tables, so
//! the same file always produces the same condition and confidence.

pub mod classify;
pub mod digest;
pub mod remedies;
pub mod report;

pub use classify::{classify, Classification, CONDITION_LABELS};
pub use digest::content_digest;
pub use remedies::{remedy_for, DetailedAnalysis, RemedyRecord};
pub use report::{assemble_report, ScanResult};

use chrono::Utc;

/// Analyze an uploaded image and build its scan report.
pub fn analyze(bytes: &[u8], file_name: &str, reference_base_url: &str) -> ScanResult {
    let digest = content_digest(bytes, file_name, bytes.len() as u64);
    let classification = classify(digest);

    tracing::debug!(
        file_name,
        size = bytes.len(),
        digest,
        condition = classification.label,
        confidence = classification.confidence,
        "Scan classified"
    );

    let record = remedy_for(classification.label);
    assemble_report(&classification, record, reference_base_url, Utc::now())
}
