use crate::db::DatabaseError;
use serde::{Deserialize, Serialize};

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = DatabaseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(DatabaseError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(UrgencyLevel {
    Low => "low",
    Medium => "medium",
    High => "high",
});

str_enum!(Mood {
    Great => "great",
    Good => "good",
    Neutral => "neutral",
    Poor => "poor",
    Terrible => "terrible",
});

str_enum!(SeverityBand {
    Mild => "mild",
    Moderate => "moderate",
    Severe => "severe",
});

str_enum!(WellnessCategory {
    DailyHabits => "daily_habits",
    RestRecovery => "rest_recovery",
    FoodNutrition => "food_nutrition",
    SymptomCare => "symptom_care",
    AssistantEngagement => "assistant_engagement",
    MindMood => "mind_mood",
    WeeklyWellness => "weekly_wellness",
});

impl WellnessCategory {
    pub const ALL: [WellnessCategory; 7] = [
        Self::DailyHabits,
        Self::RestRecovery,
        Self::FoodNutrition,
        Self::SymptomCare,
        Self::AssistantEngagement,
        Self::MindMood,
        Self::WeeklyWellness,
    ];

    /// Upper-cased, space-separated label, e.g. `MIND MOOD`.
    pub fn display_label(&self) -> String {
        self.as_str().replace('_', " ").to_uppercase()
    }
}

impl SeverityBand {
    /// Journal severity (1-10) → display band.
    pub fn from_score(severity: u8) -> Self {
        match severity {
            0..=3 => Self::Mild,
            4..=6 => Self::Moderate,
            _ => Self::Severe,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn urgency_level_round_trip() {
        for (variant, s) in [
            (UrgencyLevel::Low, "low"),
            (UrgencyLevel::Medium, "medium"),
            (UrgencyLevel::High, "high"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(UrgencyLevel::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn mood_round_trip() {
        for (variant, s) in [
            (Mood::Great, "great"),
            (Mood::Good, "good"),
            (Mood::Neutral, "neutral"),
            (Mood::Poor, "poor"),
            (Mood::Terrible, "terrible"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(Mood::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn serde_uses_lowercase_names() {
        assert_eq!(serde_json::to_string(&UrgencyLevel::High).unwrap(), "\"high\"");
        let mood: Mood = serde_json::from_str("\"poor\"").unwrap();
        assert_eq!(mood, Mood::Poor);
    }

    #[test]
    fn severity_bands() {
        assert_eq!(SeverityBand::from_score(1), SeverityBand::Mild);
        assert_eq!(SeverityBand::from_score(3), SeverityBand::Mild);
        assert_eq!(SeverityBand::from_score(4), SeverityBand::Moderate);
        assert_eq!(SeverityBand::from_score(6), SeverityBand::Moderate);
        assert_eq!(SeverityBand::from_score(7), SeverityBand::Severe);
        assert_eq!(SeverityBand::from_score(10), SeverityBand::Severe);
    }

    #[test]
    fn wellness_category_labels() {
        assert_eq!(WellnessCategory::DailyHabits.display_label(), "DAILY HABITS");
        assert_eq!(
            WellnessCategory::AssistantEngagement.display_label(),
            "ASSISTANT ENGAGEMENT"
        );
        for category in WellnessCategory::ALL {
            assert_eq!(WellnessCategory::from_str(category.as_str()).unwrap(), category);
        }
    }

    #[test]
    fn invalid_enum_returns_error() {
        assert!(UrgencyLevel::from_str("critical").is_err());
        assert!(Mood::from_str("").is_err());
        assert!(SeverityBand::from_str("Mild").is_err());
    }
}
