pub mod commands;
pub mod entry;
pub mod patch;
pub mod stats;
pub mod vocab;

pub use entry::{CatTime, DayColor, DayEntry, Habits, Nutrition, Reflection, Sleep, Wellbeing};
pub use patch::{EntryPatch, HabitsPatch, TagField};
pub use stats::{week_stats, WeekStats};
