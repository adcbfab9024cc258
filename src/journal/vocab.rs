//! Fixed tag vocabularies offered by the check-in views. Stored tags are
//! the exact strings below; free-form plant names are allowed alongside the
//! suggestions.

use serde::{Deserialize, Serialize};

pub const SLEEP_QUALITY: &[&str] = &["😴 Restful", "😐 Okay", "😵 Poor", "🔄 Restless"];

pub const DISRUPTIONS: &[&str] = &[
    "🌙 Woke during night",
    "🐱 Cat care",
    "💭 Racing thoughts",
    "🚽 Bathroom",
    "🔥 Too hot",
    "❄️ Too cold",
    "🛏️ Uncomfortable",
    "💪 Back/body pain",
    "🔊 Noise",
];

pub const MORNING_STATE: &[&str] = &[
    "⚡ Energized",
    "😊 Rested",
    "😑 Tired but okay",
    "🥱 Exhausted",
    "🤕 Groggy",
];

pub const DIGESTIVE_SYMPTOMS: &[&str] = &[
    "🔥 Reflux",
    "💨 Bloating",
    "😣 Discomfort",
    "🩸 Period",
    "😴 Fatigue",
    "🤕 Headache",
];

pub const COMMON_PLANTS: &[&str] = &[
    "Avocado",
    "Broccoli",
    "Apple",
    "Raspberry",
    "Oats",
    "Cinnamon",
    "Ginger",
    "Lentils",
    "Chickpeas",
    "Spinach",
    "Kale",
    "Carrot",
    "Banana",
    "Blueberry",
    "Pumpkin seeds",
    "Walnut",
    "Flaxseed",
    "Garlic",
    "Turmeric",
    "Onion",
    "Sweet potato",
    "Beetroot",
    "Parsley",
    "Dill",
    "Cumin",
    "Fennel",
    "Rye",
    "Barley",
    "Brown rice",
    "Quinoa",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagVocabulary {
    pub sleep_quality: Vec<String>,
    pub disruptions: Vec<String>,
    pub morning_state: Vec<String>,
    pub digestive_symptoms: Vec<String>,
    pub common_plants: Vec<String>,
}

impl TagVocabulary {
    pub fn builtin() -> Self {
        fn owned(tags: &[&str]) -> Vec<String> {
            tags.iter().map(|tag| tag.to_string()).collect()
        }

        Self {
            sleep_quality: owned(SLEEP_QUALITY),
            disruptions: owned(DISRUPTIONS),
            morning_state: owned(MORNING_STATE),
            digestive_symptoms: owned(DIGESTIVE_SYMPTOMS),
            common_plants: owned(COMMON_PLANTS),
        }
    }
}
