//! Static remedy records keyed by condition label.
//!
//! Curated entries cover the most common scan outcomes. Every other
//! label resolves to [`fallback_record`], so lookups never fail.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::models::enums::UrgencyLevel;
use crate::models::MedicationSuggestion;

/// Longer-form notes shown on the scan detail view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailedAnalysis {
    pub skin_condition: String,
    pub possible_causes: Vec<String>,
    pub expected_healing_time: String,
    pub warning_signs: Vec<String>,
}

/// Home care, OTC medication and urgency bundle for one condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemedyRecord {
    pub home_remedies: Vec<String>,
    pub medications: Vec<MedicationSuggestion>,
    pub urgency: UrgencyLevel,
    /// Per-condition sentence appended to the symptom description.
    pub description: Option<String>,
    pub detailed_analysis: DetailedAnalysis,
}

static CURATED: LazyLock<HashMap<&'static str, RemedyRecord>> = LazyLock::new(build_curated);

static FALLBACK: LazyLock<RemedyRecord> = LazyLock::new(|| RemedyRecord {
    home_remedies: strings(&[
        "Keep area clean and dry",
        "Monitor for changes",
        "Consult healthcare provider if symptoms persist",
    ]),
    medications: vec![MedicationSuggestion::new(
        "Over-the-counter anti-inflammatory",
        "As directed on package",
        "As needed",
        "Follow package instructions and consult pharmacist if unsure",
    )],
    urgency: UrgencyLevel::Low,
    description: None,
    detailed_analysis: DetailedAnalysis {
        skin_condition: "Requires professional medical evaluation".into(),
        possible_causes: strings(&["Various factors may contribute to this condition"]),
        expected_healing_time: "Variable, depending on treatment".into(),
        warning_signs: strings(&["Worsening symptoms", "Signs of infection", "Persistent pain"]),
    },
});

/// Remedy record for `label`, or the generic fallback.
pub fn remedy_for(label: &str) -> &'static RemedyRecord {
    CURATED.get(label).unwrap_or_else(fallback_record)
}

pub fn fallback_record() -> &'static RemedyRecord {
    &FALLBACK
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn build_curated() -> HashMap<&'static str, RemedyRecord> {
    let mut map = HashMap::new();

    map.insert(
        "Acute Laceration",
        RemedyRecord {
            home_remedies: strings(&[
                "Clean wound gently with sterile saline solution",
                "Apply direct pressure to control bleeding",
                "Elevate the injured area above heart level if possible",
                "Keep wound moist with petroleum jelly and covered",
            ]),
            medications: vec![MedicationSuggestion::new(
                "Antibiotic Ointment (Bacitracin)",
                "Apply thin layer",
                "2-3 times daily",
                "Clean wound before application. Watch for signs of infection.",
            )],
            urgency: UrgencyLevel::Medium,
            description: Some(
                "Clean wound edges with minimal surrounding tissue damage suggest a recent injury."
                    .into(),
            ),
            detailed_analysis: DetailedAnalysis {
                skin_condition: "Fresh wound with clean edges showing minimal tissue damage".into(),
                possible_causes: strings(&[
                    "Sharp object cut",
                    "Glass injury",
                    "Metal edge contact",
                ]),
                expected_healing_time: "7-14 days with proper care".into(),
                warning_signs: strings(&[
                    "Increasing redness",
                    "Warmth",
                    "Pus formation",
                    "Red streaking",
                ]),
            },
        },
    );

    map.insert(
        "Contact Dermatitis",
        RemedyRecord {
            home_remedies: strings(&[
                "Remove or avoid the triggering substance immediately",
                "Rinse area with cool water for 15-20 minutes",
                "Apply cool, wet compresses for 15-30 minutes several times daily",
                "Use fragrance-free moisturizers to prevent drying",
            ]),
            medications: vec![MedicationSuggestion::new(
                "Hydrocortisone Cream 1%",
                "Apply thin layer",
                "2-4 times daily",
                "Do not use on broken skin. Limit use to 7 days without consulting doctor.",
            )],
            urgency: UrgencyLevel::Low,
            description: Some(
                "The pattern is consistent with an inflammatory reaction to something that touched the skin."
                    .into(),
            ),
            detailed_analysis: DetailedAnalysis {
                skin_condition: "Inflammatory skin reaction with possible vesicles or scaling".into(),
                possible_causes: strings(&[
                    "Chemical exposure",
                    "Plant allergens",
                    "Metal sensitivity",
                    "Cosmetic reaction",
                ]),
                expected_healing_time: "1-3 weeks after removing trigger".into(),
                warning_signs: strings(&[
                    "Severe swelling",
                    "Blistering",
                    "Signs of infection",
                    "Breathing difficulty",
                ]),
            },
        },
    );

    map.insert(
        "Burn (1st Degree)",
        RemedyRecord {
            home_remedies: strings(&[
                "Cool the burn under cool running water for 10-20 minutes",
                "Apply aloe vera gel to soothe the skin",
                "Cover loosely with a sterile non-stick bandage",
                "Avoid sun exposure on the affected area",
            ]),
            medications: vec![MedicationSuggestion::new(
                "Ibuprofen",
                "200-400mg",
                "Every 6-8 hours as needed",
                "Take with food. Avoid if you have stomach ulcers or kidney problems.",
            )],
            urgency: UrgencyLevel::Low,
            description: Some(
                "Redness without blistering points to a superficial burn of the outer skin layer."
                    .into(),
            ),
            detailed_analysis: DetailedAnalysis {
                skin_condition: "Superficial burn limited to the epidermis".into(),
                possible_causes: strings(&["Brief heat contact", "Sunburn", "Hot liquid splash"]),
                expected_healing_time: "3-6 days".into(),
                warning_signs: strings(&["Blister formation", "Spreading redness", "Fever"]),
            },
        },
    );

    map.insert(
        "Burn (2nd Degree)",
        RemedyRecord {
            home_remedies: strings(&[
                "Immediately cool with running water for 20 minutes",
                "Do NOT use ice, butter, or home remedies",
                "Gently pat dry and apply sterile gauze",
                "Take over-the-counter pain medication as needed",
            ]),
            medications: vec![MedicationSuggestion::new(
                "Silver Sulfadiazine Cream",
                "Apply 1/16 inch thick layer",
                "1-2 times daily",
                "Prescription required. Monitor for allergic reactions.",
            )],
            urgency: UrgencyLevel::High,
            description: Some(
                "Visible blistering and tissue damage indicate a partial thickness burn.".into(),
            ),
            detailed_analysis: DetailedAnalysis {
                skin_condition: "Partial thickness burn with blistering and severe pain".into(),
                possible_causes: strings(&[
                    "Heat exposure",
                    "Chemical burns",
                    "Electrical injury",
                    "Sun exposure",
                ]),
                expected_healing_time: "2-3 weeks with potential scarring".into(),
                warning_signs: strings(&[
                    "Signs of infection",
                    "Increased pain after initial improvement",
                    "Fever",
                    "Large burned area",
                ]),
            },
        },
    );

    map.insert(
        "Eczema/Atopic Dermatitis",
        RemedyRecord {
            home_remedies: strings(&[
                "Moisturize at least twice daily with a thick, fragrance-free cream",
                "Take short lukewarm baths and pat skin dry",
                "Wear soft, breathable cotton clothing",
                "Identify and avoid personal triggers such as harsh soaps",
            ]),
            medications: vec![
                MedicationSuggestion::new(
                    "Hydrocortisone Cream 1%",
                    "Apply thin layer",
                    "1-2 times daily",
                    "Short-term use only. Avoid the face unless advised by a doctor.",
                ),
                MedicationSuggestion::new(
                    "Oral Antihistamine (Cetirizine)",
                    "10mg",
                    "Once daily",
                    "May cause drowsiness in some people.",
                ),
            ],
            urgency: UrgencyLevel::Low,
            description: Some(
                "The affected area shows the dry, inflamed patches typical of a chronic eczematous condition."
                    .into(),
            ),
            detailed_analysis: DetailedAnalysis {
                skin_condition: "Dry, itchy, inflamed skin with possible thickening".into(),
                possible_causes: strings(&[
                    "Genetic predisposition",
                    "Irritating soaps or fabrics",
                    "Stress",
                    "Dry climate",
                ]),
                expected_healing_time: "Flares settle in 1-3 weeks with consistent care".into(),
                warning_signs: strings(&["Oozing or crusting", "Fever", "Rapid spreading"]),
            },
        },
    );

    map.insert(
        "Cellulitis",
        RemedyRecord {
            home_remedies: strings(&[
                "Rest and elevate the affected area",
                "Mark the edge of the redness to track spreading",
                "Keep the skin clean and covered",
            ]),
            medications: vec![MedicationSuggestion::new(
                "Acetaminophen",
                "500-1000mg",
                "Every 6 hours as needed",
                "Cellulitis usually needs prescription antibiotics. Do not exceed 3000mg per day.",
            )],
            urgency: UrgencyLevel::High,
            description: Some(
                "Spreading redness and swelling suggest a bacterial skin infection.".into(),
            ),
            detailed_analysis: DetailedAnalysis {
                skin_condition: "Warm, swollen, spreading area of red skin".into(),
                possible_causes: strings(&[
                    "Bacteria entering through a cut or crack",
                    "Insect bites",
                    "Poor circulation",
                ]),
                expected_healing_time: "7-10 days with antibiotic treatment".into(),
                warning_signs: strings(&[
                    "Fever or chills",
                    "Red streaks from the area",
                    "Rapidly expanding redness",
                ]),
            },
        },
    );

    map.insert(
        "Fungal Infection (Tinea)",
        RemedyRecord {
            home_remedies: strings(&[
                "Keep the area clean and completely dry",
                "Change socks and underwear daily",
                "Avoid sharing towels or clothing",
            ]),
            medications: vec![MedicationSuggestion::new(
                "Clotrimazole Cream 1%",
                "Apply thin layer",
                "Twice daily for 2-4 weeks",
                "Continue for 1 week after symptoms clear to prevent recurrence.",
            )],
            urgency: UrgencyLevel::Low,
            description: Some(
                "The ring-like appearance suggests a fungal cause.".into(),
            ),
            detailed_analysis: DetailedAnalysis {
                skin_condition: "Circular, scaly patch with a raised border".into(),
                possible_causes: strings(&[
                    "Warm, moist environments",
                    "Contact with infected surfaces",
                    "Shared personal items",
                ]),
                expected_healing_time: "2-4 weeks with antifungal treatment".into(),
                warning_signs: strings(&["Spreading despite treatment", "Painful cracking", "Pus"]),
            },
        },
    );

    map.insert(
        "Insect Bite/Sting",
        RemedyRecord {
            home_remedies: strings(&[
                "Wash the area with soap and water",
                "Apply a cold pack for 10 minutes to reduce swelling",
                "Avoid scratching the bite",
            ]),
            medications: vec![MedicationSuggestion::new(
                "Oral Antihistamine (Diphenhydramine)",
                "25mg",
                "As needed for itching",
                "May cause drowsiness. Consult doctor if pregnant.",
            )],
            urgency: UrgencyLevel::Low,
            description: Some(
                "A small raised swelling with a central point is typical of a bite or sting.".into(),
            ),
            detailed_analysis: DetailedAnalysis {
                skin_condition: "Localized raised, itchy swelling".into(),
                possible_causes: strings(&["Mosquitoes", "Bees or wasps", "Fleas", "Spiders"]),
                expected_healing_time: "2-5 days".into(),
                warning_signs: strings(&[
                    "Difficulty breathing",
                    "Swelling of the face or throat",
                    "Spreading redness",
                ]),
            },
        },
    );

    map
}
