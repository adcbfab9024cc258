//! Typed partial updates and the merge that applies them.
//!
//! A patch mirrors the entry shape with every field optional. `None` means
//! "leave the base value alone"; `Some` replaces the base value outright.
//! Tag lists are replaced wholesale — merge never unions arrays, so a
//! membership toggle is expressed by sending the full next list (see
//! [`toggled`]).

use serde::{Deserialize, Serialize};

use super::entry::{CatTime, DayColor, DayEntry, Habits, Nutrition, Reflection, Sleep, Wellbeing};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EntryPatch {
    pub sleep: Option<SleepPatch>,
    pub habits: Option<HabitsPatch>,
    pub nutrition: Option<NutritionPatch>,
    pub wellbeing: Option<WellbeingPatch>,
    pub reflection: Option<ReflectionPatch>,
    pub day_color: Option<DayColor>,
    pub tomorrow_goal: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SleepPatch {
    pub bedtime: Option<String>,
    pub waketime: Option<String>,
    pub quality: Option<Vec<String>>,
    pub disruptions: Option<Vec<String>>,
    pub morning_state: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HabitsPatch {
    pub walk: Option<bool>,
    pub focus: Option<bool>,
    pub stretching: Option<bool>,
    pub vitamins: Option<bool>,
    pub reading: Option<bool>,
    pub water: Option<u32>,
    pub period: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NutritionPatch {
    pub plants: Option<Vec<String>>,
    pub digestive_symptoms: Option<Vec<String>>,
    pub digestive_cause: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WellbeingPatch {
    pub energy: Option<u8>,
    pub mood: Option<u8>,
    pub physical: Option<u8>,
    pub mental_clarity: Option<u8>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReflectionPatch {
    pub win: Option<String>,
    pub struggle: Option<String>,
    pub cat_time: Option<CatTime>,
}

/// Base value unless the patch carries a replacement.
fn overlay<T: Clone>(base: &T, patch: &Option<T>) -> T {
    match patch {
        Some(value) => value.clone(),
        None => base.clone(),
    }
}

impl DayEntry {
    /// Produces a new entry with `patch` applied on top of `self`. Patched
    /// sections recurse; patched leaves replace; everything else is
    /// preserved. Neither input is mutated.
    pub fn merged(&self, patch: &EntryPatch) -> DayEntry {
        DayEntry {
            sleep: match &patch.sleep {
                Some(sleep) => self.sleep.merged(sleep),
                None => self.sleep.clone(),
            },
            habits: match &patch.habits {
                Some(habits) => self.habits.merged(habits),
                None => self.habits.clone(),
            },
            nutrition: match &patch.nutrition {
                Some(nutrition) => self.nutrition.merged(nutrition),
                None => self.nutrition.clone(),
            },
            wellbeing: match &patch.wellbeing {
                Some(wellbeing) => self.wellbeing.merged(wellbeing),
                None => self.wellbeing.clone(),
            },
            reflection: match &patch.reflection {
                Some(reflection) => self.reflection.merged(reflection),
                None => self.reflection.clone(),
            },
            day_color: overlay(&self.day_color, &patch.day_color),
            tomorrow_goal: overlay(&self.tomorrow_goal, &patch.tomorrow_goal),
        }
    }
}

impl Sleep {
    fn merged(&self, patch: &SleepPatch) -> Sleep {
        Sleep {
            bedtime: overlay(&self.bedtime, &patch.bedtime),
            waketime: overlay(&self.waketime, &patch.waketime),
            quality: overlay(&self.quality, &patch.quality),
            disruptions: overlay(&self.disruptions, &patch.disruptions),
            morning_state: overlay(&self.morning_state, &patch.morning_state),
        }
    }
}

impl Habits {
    fn merged(&self, patch: &HabitsPatch) -> Habits {
        Habits {
            walk: overlay(&self.walk, &patch.walk),
            focus: overlay(&self.focus, &patch.focus),
            stretching: overlay(&self.stretching, &patch.stretching),
            vitamins: overlay(&self.vitamins, &patch.vitamins),
            reading: overlay(&self.reading, &patch.reading),
            water: overlay(&self.water, &patch.water),
            period: overlay(&self.period, &patch.period),
        }
    }
}

impl Nutrition {
    fn merged(&self, patch: &NutritionPatch) -> Nutrition {
        Nutrition {
            plants: overlay(&self.plants, &patch.plants),
            digestive_symptoms: overlay(&self.digestive_symptoms, &patch.digestive_symptoms),
            digestive_cause: overlay(&self.digestive_cause, &patch.digestive_cause),
        }
    }
}

impl Wellbeing {
    fn merged(&self, patch: &WellbeingPatch) -> Wellbeing {
        Wellbeing {
            energy: overlay(&self.energy, &patch.energy),
            mood: overlay(&self.mood, &patch.mood),
            physical: overlay(&self.physical, &patch.physical),
            mental_clarity: overlay(&self.mental_clarity, &patch.mental_clarity),
        }
    }
}

impl Reflection {
    fn merged(&self, patch: &ReflectionPatch) -> Reflection {
        Reflection {
            win: overlay(&self.win, &patch.win),
            struggle: overlay(&self.struggle, &patch.struggle),
            cat_time: overlay(&self.cat_time, &patch.cat_time),
        }
    }
}

/// The tag lists a membership toggle can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TagField {
    SleepQuality,
    SleepDisruptions,
    MorningState,
    DigestiveSymptoms,
    Plants,
}

impl TagField {
    pub fn current<'a>(&self, entry: &'a DayEntry) -> &'a [String] {
        match self {
            TagField::SleepQuality => &entry.sleep.quality,
            TagField::SleepDisruptions => &entry.sleep.disruptions,
            TagField::MorningState => &entry.sleep.morning_state,
            TagField::DigestiveSymptoms => &entry.nutrition.digestive_symptoms,
            TagField::Plants => &entry.nutrition.plants,
        }
    }

    /// Wraps a full replacement list in a patch targeting this field.
    pub fn replacement_patch(&self, tags: Vec<String>) -> EntryPatch {
        match self {
            TagField::SleepQuality => EntryPatch {
                sleep: Some(SleepPatch {
                    quality: Some(tags),
                    ..Default::default()
                }),
                ..Default::default()
            },
            TagField::SleepDisruptions => EntryPatch {
                sleep: Some(SleepPatch {
                    disruptions: Some(tags),
                    ..Default::default()
                }),
                ..Default::default()
            },
            TagField::MorningState => EntryPatch {
                sleep: Some(SleepPatch {
                    morning_state: Some(tags),
                    ..Default::default()
                }),
                ..Default::default()
            },
            TagField::DigestiveSymptoms => EntryPatch {
                nutrition: Some(NutritionPatch {
                    digestive_symptoms: Some(tags),
                    ..Default::default()
                }),
                ..Default::default()
            },
            TagField::Plants => EntryPatch {
                nutrition: Some(NutritionPatch {
                    plants: Some(tags),
                    ..Default::default()
                }),
                ..Default::default()
            },
        }
    }
}

/// The next tag list after toggling `value`: removed when present,
/// appended when absent. Insertion order of the remaining tags is kept.
pub fn toggled(current: &[String], value: &str) -> Vec<String> {
    if current.iter().any(|tag| tag == value) {
        current.iter().filter(|tag| *tag != value).cloned().collect()
    } else {
        let mut next = current.to_vec();
        next.push(value.to_string());
        next
    }
}
