//! Wellness reminder catalogue.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use crate::models::enums::WellnessCategory;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reminder {
    pub category: WellnessCategory,
    pub category_label: String,
    pub message: &'static str,
}

pub fn messages(category: WellnessCategory) -> &'static [&'static str] {
    match category {
        WellnessCategory::DailyHabits => &[
            "Hydrate to heal – drink a glass of water now 💧",
            "Time for a quick stretch! Loosen up those joints 🧘‍♂️",
            "Wash your hands! Your health starts with hygiene ✋🧼",
            "Take a deep breath. Hold. Exhale slowly. Do it 3 times 🌬️",
            "Step outside for 5 mins of sunlight – your body will thank you ☀️",
        ],
        WellnessCategory::RestRecovery => &[
            "Healing needs rest. Don't skip sleep tonight 😴",
            "Let your body recover, take a tech break for 10 mins 📵",
            "Had symptoms lately? Give your body some downtime 🛏️",
        ],
        WellnessCategory::FoodNutrition => &[
            "Add a fruit to your next meal – it's nature's medicine 🍎",
            "Warm turmeric milk helps with inflammation – try it tonight! 🥛✨",
            "Don't skip meals – healing starts with nourishment 🍲",
        ],
        WellnessCategory::SymptomCare => &[
            "Feeling unwell? Don't guess – scan with EchoRemedy 📸",
            "Recheck old symptoms? Visit your scan history anytime 🧾",
            "Take a moment to log how you're feeling today 📝",
        ],
        WellnessCategory::AssistantEngagement => &[
            "Got a question about that rash or cut? The EchoRemedy assistant is here 24/7 🤖💬",
            "Need a second opinion? Ask the assistant for a remedy or tip 🧠",
        ],
        WellnessCategory::MindMood => &[
            "Smile check 😊 – you're doing better than you think",
            "Mental health matters – write 1 thing you're grateful for today 💙",
            "Feeling low? Deep breaths + 5 positive thoughts 🌈",
        ],
        WellnessCategory::WeeklyWellness => &[
            "It's Sunday – review your scan history and progress 📊",
            "Midweek tip: Try a simple home remedy for that minor ache 🧂",
            "New week, new journal entry – how are you feeling lately? 📔",
        ],
    }
}

/// Pick a reminder, from `category` when given, otherwise from a
/// uniformly chosen category.
pub fn random_reminder<R: Rng + ?Sized>(
    rng: &mut R,
    category: Option<WellnessCategory>,
) -> Reminder {
    let category = category
        .or_else(|| WellnessCategory::ALL.choose(rng).copied())
        .unwrap_or(WellnessCategory::DailyHabits);
    let message = messages(category).choose(rng).copied().unwrap_or_default();

    Reminder {
        category,
        category_label: category.display_label(),
        message,
    }
}
