//! Day-entry data model.
//!
//! One `DayEntry` holds everything logged for a single calendar day. Every
//! type here derives `Default` (or implements it by hand) so that a sparse
//! record read from disk always presents with all fields filled in — on the
//! wire and on disk, absence means "use the default".

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DayEntry {
    pub sleep: Sleep,
    pub habits: Habits,
    pub nutrition: Nutrition,
    pub wellbeing: Wellbeing,
    pub reflection: Reflection,
    pub day_color: DayColor,
    pub tomorrow_goal: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Sleep {
    /// `HH:MM` time of day, or empty when not yet recorded.
    pub bedtime: String,
    pub waketime: String,
    pub quality: Vec<String>,
    pub disruptions: Vec<String>,
    pub morning_state: Vec<String>,
}

impl Sleep {
    /// Minutes slept between bedtime and waketime, wrapping past midnight.
    /// `None` unless both times are recorded and well-formed.
    pub fn duration_minutes(&self) -> Option<i64> {
        let bedtime = NaiveTime::parse_from_str(&self.bedtime, "%H:%M").ok()?;
        let waketime = NaiveTime::parse_from_str(&self.waketime, "%H:%M").ok()?;
        let mut minutes = waketime.signed_duration_since(bedtime).num_minutes();
        if minutes < 0 {
            minutes += 24 * 60;
        }
        Some(minutes)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Habits {
    pub walk: bool,
    pub focus: bool,
    pub stretching: bool,
    pub vitamins: bool,
    pub reading: bool,
    /// Glasses of water. Unbounded above, floored at zero by the caller.
    pub water: u32,
    pub period: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Nutrition {
    /// Distinct plant names in insertion order.
    pub plants: Vec<String>,
    pub digestive_symptoms: Vec<String>,
    pub digestive_cause: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Wellbeing {
    pub energy: u8,
    pub mood: u8,
    pub physical: u8,
    pub mental_clarity: u8,
}

impl Default for Wellbeing {
    fn default() -> Self {
        // Sliders rest at the middle of the 1-10 scale.
        Self {
            energy: 5,
            mood: 5,
            physical: 5,
            mental_clarity: 5,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Reflection {
    pub win: String,
    pub struggle: String,
    pub cat_time: CatTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CatTime {
    #[serde(rename = "")]
    Unset,
    Light,
    Moderate,
    Intensive,
}

impl Default for CatTime {
    fn default() -> Self {
        CatTime::Unset
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayColor {
    #[serde(rename = "")]
    Unset,
    Green,
    Yellow,
    Red,
}

impl Default for DayColor {
    fn default() -> Self {
        DayColor::Unset
    }
}
