//! Scan report assembly: narrative strings around a classification.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::classify::{confidence_percent, Classification};
use super::remedies::{DetailedAnalysis, RemedyRecord};
use crate::models::enums::UrgencyLevel;
use crate::models::MedicationSuggestion;

/// Number of reference image links attached to each report.
const SIMILAR_IMAGE_COUNT: usize = 3;

const GENERIC_DESCRIPTION: &str =
    "The scanner matched visual features of the uploaded image against its condition table.";

/// Complete, immutable outcome of one symptom scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanResult {
    pub condition: String,
    pub confidence: f64,
    pub symptom_description: String,
    pub ai_summary: String,
    pub home_remedies: Vec<String>,
    pub medications: Vec<MedicationSuggestion>,
    pub urgency: UrgencyLevel,
    pub detailed_analysis: DetailedAnalysis,
    pub similar_images: Vec<String>,
    pub generated_at: DateTime<Utc>,
}

/// Build the report for a classification and its remedy record.
pub fn assemble_report(
    classification: &Classification,
    record: &RemedyRecord,
    reference_base_url: &str,
    generated_at: DateTime<Utc>,
) -> ScanResult {
    let label = classification.label;
    let confidence = classification.confidence;

    ScanResult {
        condition: label.to_string(),
        confidence,
        symptom_description: symptom_description(label, confidence, record),
        ai_summary: ai_summary(label, record.urgency, confidence),
        home_remedies: record.home_remedies.clone(),
        medications: record.medications.clone(),
        urgency: record.urgency,
        detailed_analysis: record.detailed_analysis.clone(),
        similar_images: similar_images(label, reference_base_url),
        generated_at,
    }
}

pub fn symptom_description(label: &str, confidence: f64, record: &RemedyRecord) -> String {
    let detail = record.description.as_deref().unwrap_or(GENERIC_DESCRIPTION);
    format!(
        "Image analysis indicates {} with {}% confidence. {}",
        label.to_lowercase(),
        confidence_percent(confidence),
        detail
    )
}

pub fn ai_summary(label: &str, urgency: UrgencyLevel, confidence: f64) -> String {
    let closing = match urgency {
        UrgencyLevel::High => "Please seek immediate medical care.",
        _ => "Follow the recommended care guidelines and monitor for any changes.",
    };

    format!(
        "Our analysis matched your image with {} ({}%) and identified this as {}. \
         This condition {}. The suggestions below include home care steps and \
         over-the-counter options from our remedy database. {}",
        confidence_band(confidence),
        confidence_percent(confidence),
        label.to_lowercase(),
        urgency_text(urgency),
        closing
    )
}

pub fn confidence_band(confidence: f64) -> &'static str {
    if confidence > 0.9 {
        "very high confidence"
    } else if confidence > 0.7 {
        "high confidence"
    } else {
        "moderate confidence"
    }
}

pub fn urgency_text(urgency: UrgencyLevel) -> &'static str {
    match urgency {
        UrgencyLevel::High => "requires immediate medical attention",
        UrgencyLevel::Medium => "should be monitored and may need medical consultation",
        UrgencyLevel::Low => "can typically be managed with home care",
    }
}

/// Reference image links for a label under `base_url`.
pub fn similar_images(label: &str, base_url: &str) -> Vec<String> {
    let slug = slugify(label);
    let base = base_url.trim_end_matches('/');
    (1..=SIMILAR_IMAGE_COUNT)
        .map(|n| format!("{base}/{slug}-{n}.jpg"))
        .collect()
}

/// Lowercase ASCII slug: alphanumeric runs joined by single dashes.
fn slugify(label: &str) -> String {
    label
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::remedies::{fallback_record, remedy_for};
    use chrono::TimeZone;

    fn classification(label: &'static str, confidence: f64) -> Classification {
        Classification {
            label,
            index: 0,
            confidence,
        }
    }

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap()
    }

    #[test]
    fn confidence_bands() {
        assert_eq!(confidence_band(0.95), "very high confidence");
        assert_eq!(confidence_band(0.9), "high confidence");
        assert_eq!(confidence_band(0.75), "high confidence");
        assert_eq!(confidence_band(0.70), "moderate confidence");
    }

    #[test]
    fn description_uses_curated_template() {
        let record = remedy_for("Acute Laceration");
        let text = symptom_description("Acute Laceration", 0.8207, record);
        assert!(text.starts_with("Image analysis indicates acute laceration with 82% confidence."));
        assert!(text.contains("recent injury"));
    }

    #[test]
    fn description_falls_back_to_generic_template() {
        let text = symptom_description("Rosacea", 0.7893, fallback_record());
        assert!(text.contains("79% confidence"));
        assert!(text.ends_with(GENERIC_DESCRIPTION));
    }

    #[test]
    fn summary_for_high_urgency_urges_care() {
        let text = ai_summary("Burn (2nd Degree)", UrgencyLevel::High, 0.93);
        assert!(text.contains("very high confidence (93%)"));
        assert!(text.contains("burn (2nd degree)"));
        assert!(text.contains("requires immediate medical attention"));
        assert!(text.ends_with("Please seek immediate medical care."));
    }

    #[test]
    fn summary_for_low_urgency_suggests_monitoring() {
        let text = ai_summary("Contact Dermatitis", UrgencyLevel::Low, 0.8);
        assert!(text.contains("high confidence (80%)"));
        assert!(text.contains("can typically be managed with home care"));
        assert!(text.ends_with("monitor for any changes."));
    }

    #[test]
    fn report_passes_record_fields_through() {
        let record = remedy_for("Burn (2nd Degree)");
        let report = assemble_report(
            &classification("Burn (2nd Degree)", 0.91),
            record,
            "https://img.example.org/ref",
            fixed_time(),
        );
        assert_eq!(report.condition, "Burn (2nd Degree)");
        assert_eq!(report.home_remedies, record.home_remedies);
        assert_eq!(report.medications, record.medications);
        assert_eq!(report.urgency, UrgencyLevel::High);
        assert_eq!(report.detailed_analysis, record.detailed_analysis);
        assert_eq!(report.generated_at, fixed_time());
    }

    #[test]
    fn similar_images_use_slugged_label() {
        let links = similar_images("Burn (2nd Degree)", "https://img.example.org/ref/");
        assert_eq!(
            links,
            vec![
                "https://img.example.org/ref/burn-2nd-degree-1.jpg",
                "https://img.example.org/ref/burn-2nd-degree-2.jpg",
                "https://img.example.org/ref/burn-2nd-degree-3.jpg",
            ]
        );
    }

    #[test]
    fn slug_handles_slashes() {
        assert_eq!(slugify("Pressure Sore/Bedsore"), "pressure-sore-bedsore");
        assert_eq!(slugify("Basal Cell Carcinoma (Suspected)"), "basal-cell-carcinoma-suspected");
    }
}
