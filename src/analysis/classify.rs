//! Condition lookup keyed by the content digest.
//!
//! This is a table lookup, not inference: the digest picks a label by
//! modulo and its middle bits set a cosmetic confidence score.

use serde::Serialize;

/// Every condition label the scanner can report, in lookup order.
pub const CONDITION_LABELS: &[&str] = &[
    "Acute Laceration",
    "Chronic Wound",
    "Diabetic Ulcer",
    "Pressure Sore/Bedsore",
    "Venous Leg Ulcer",
    "Arterial Ulcer",
    "Surgical Wound",
    "Burn (1st Degree)",
    "Burn (2nd Degree)",
    "Burn (3rd Degree)",
    "Contact Dermatitis",
    "Eczema/Atopic Dermatitis",
    "Psoriasis",
    "Cellulitis",
    "Impetigo",
    "Fungal Infection (Tinea)",
    "Viral Skin Infection",
    "Insect Bite/Sting",
    "Allergic Reaction",
    "Melanoma (Suspected)",
    "Basal Cell Carcinoma (Suspected)",
    "Acne Vulgaris",
    "Seborrheic Dermatitis",
    "Rosacea",
    "Hives/Urticaria",
];

pub const MIN_CONFIDENCE: f64 = 0.70;
pub const MAX_CONFIDENCE: f64 = 0.98;

/// Outcome of a digest lookup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    pub label: &'static str,
    pub index: usize,
    pub confidence: f64,
}

/// Map a digest onto the condition table.
pub fn classify(digest: u32) -> Classification {
    let index = (digest as usize) % CONDITION_LABELS.len();
    Classification {
        label: CONDITION_LABELS[index],
        index,
        confidence: confidence_for(digest, index),
    }
}

/// `0.70 + ((digest >> 8) mod 2900) / 10000 + 0.01 * (index mod 3)`,
/// capped at 0.98 and rounded to four decimals.
fn confidence_for(digest: u32, index: usize) -> f64 {
    let spread = f64::from((digest >> 8) % 2900) / 10_000.0;
    let offset = 0.01 * (index % 3) as f64;
    let raw = (MIN_CONFIDENCE + spread + offset).min(MAX_CONFIDENCE);
    (raw * 10_000.0).round() / 10_000.0
}

/// Rounded whole-number percentage used in narratives.
pub fn confidence_percent(confidence: f64) -> u32 {
    (confidence * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::digest::content_digest;

    const PNG_HEADER: [u8; 16] = [
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
        0x52,
    ];

    #[test]
    fn table_has_twenty_five_labels() {
        assert_eq!(CONDITION_LABELS.len(), 25);
    }

    #[test]
    fn golden_png_fixture() {
        let c = classify(content_digest(&PNG_HEADER, "test.png", 12345));
        assert_eq!(c.index, 9);
        assert_eq!(c.label, "Burn (3rd Degree)");
        assert!((c.confidence - 0.8207).abs() < 1e-9, "got {}", c.confidence);
    }

    #[test]
    fn empty_file_selects_valid_label() {
        let c = classify(content_digest(&[], "a", 0));
        assert_eq!(c.label, "Contact Dermatitis");
        assert!((c.confidence - 0.9702).abs() < 1e-9);
    }

    #[test]
    fn confidence_clamped_at_upper_bound() {
        // (digest >> 8) % 2900 == 2834 and index % 3 == 0 → 0.9834 before clamp
        let c = classify(content_digest(&[], "é.png", 0));
        assert_eq!(c.confidence, MAX_CONFIDENCE);
    }

    #[test]
    fn bounds_hold_across_digest_space() {
        let samples = (0..5_000u32)
            .map(|i| i.wrapping_mul(2_654_435_761))
            .chain([0, 1, u32::MAX, u32::MAX - 1, 0x00FF_FF00]);
        for digest in samples {
            let c = classify(digest);
            assert!(c.index < CONDITION_LABELS.len());
            assert_eq!(c.label, CONDITION_LABELS[c.index]);
            assert!(
                (MIN_CONFIDENCE..=MAX_CONFIDENCE).contains(&c.confidence),
                "digest {digest} gave {}",
                c.confidence
            );
        }
    }

    #[test]
    fn identical_bytes_different_names_change_label() {
        let labels: Vec<&str> = (0..8)
            .map(|i| classify(content_digest(&PNG_HEADER, &format!("photo_{i}.jpg"), 2048)).label)
            .collect();
        assert!(labels.windows(2).any(|pair| pair[0] != pair[1]));
    }

    #[test]
    fn percent_rounds_to_nearest() {
        assert_eq!(confidence_percent(0.8207), 82);
        assert_eq!(confidence_percent(0.875), 88);
        assert_eq!(confidence_percent(0.98), 98);
    }
}
