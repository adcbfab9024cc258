//! Weekly aggregation over a window of day entries.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::entry::{DayColor, DayEntry, Habits};
use crate::datekey::{week_dates, DateKey};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekStats {
    pub color_counts: ColorCounts,
    pub distinct_plant_count: usize,
    pub avg_water_per_day: f64,
    pub habit_completion: HabitCompletion,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorCounts {
    pub green: u32,
    pub yellow: u32,
    pub red: u32,
}

/// Days out of the week window, 0-7, on which each habit was completed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitCompletion {
    pub walk: u32,
    pub focus: u32,
    pub stretching: u32,
    pub vitamins: u32,
    pub reading: u32,
}

/// Folds the 7-day window starting at `monday` into summary statistics.
///
/// Days without a stored entry count as "nothing logged": they contribute to
/// no day-color bucket, are excluded from the water average entirely, and
/// count as incomplete for every habit. Pure over the collection snapshot;
/// no I/O.
pub fn week_stats(collection: &HashMap<DateKey, DayEntry>, monday: &DateKey) -> WeekStats {
    let dates = week_dates(monday);
    let logged: Vec<&DayEntry> = dates.iter().filter_map(|date| collection.get(date)).collect();

    let mut color_counts = ColorCounts::default();
    for entry in &logged {
        match entry.day_color {
            DayColor::Green => color_counts.green += 1,
            DayColor::Yellow => color_counts.yellow += 1,
            DayColor::Red => color_counts.red += 1,
            DayColor::Unset => {}
        }
    }

    // Case-sensitive exact names; "Kale" logged twice in a week is one plant.
    let distinct_plants: HashSet<&str> = logged
        .iter()
        .flat_map(|entry| entry.nutrition.plants.iter())
        .map(String::as_str)
        .collect();

    let avg_water_per_day = if logged.is_empty() {
        0.0
    } else {
        let total: u32 = logged.iter().map(|entry| entry.habits.water).sum();
        round_one_decimal(f64::from(total) / logged.len() as f64)
    };

    let habit_completion = HabitCompletion {
        walk: count_completed(&logged, |habits| habits.walk),
        focus: count_completed(&logged, |habits| habits.focus),
        stretching: count_completed(&logged, |habits| habits.stretching),
        vitamins: count_completed(&logged, |habits| habits.vitamins),
        reading: count_completed(&logged, |habits| habits.reading),
    };

    WeekStats {
        color_counts,
        distinct_plant_count: distinct_plants.len(),
        avg_water_per_day,
        habit_completion,
    }
}

fn count_completed(logged: &[&DayEntry], habit: fn(&Habits) -> bool) -> u32 {
    logged.iter().filter(|entry| habit(&entry.habits)).count() as u32
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
