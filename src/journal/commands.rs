//! Tauri command surface for the journal. Commands stay thin: membership
//! toggles and the water stepper compute a full replacement value here and
//! hand it to the store's merge path.

use serde::Serialize;
use tauri::{AppHandle, Manager, State};

use crate::datekey::{monday_of, DateKey};
use crate::journal::entry::DayEntry;
use crate::journal::patch::{toggled, EntryPatch, HabitsPatch, TagField};
use crate::journal::stats::WeekStats;
use crate::journal::vocab::TagVocabulary;
use crate::store::UpdateOutcome;
use crate::AppState;

const BACKUP_PREFIX: &str = "gizi-backup";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekDay {
    pub date_key: DateKey,
    pub entry: DayEntry,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalStatus {
    pub entry_count: usize,
    pub load_warning: Option<String>,
}

#[tauri::command]
pub fn get_entry(state: State<'_, AppState>, date_key: DateKey) -> Result<DayEntry, String> {
    Ok(state.store.entry(&date_key))
}

#[tauri::command]
pub fn update_entry(
    state: State<'_, AppState>,
    date_key: DateKey,
    patch: EntryPatch,
) -> Result<UpdateOutcome, String> {
    Ok(state.store.apply_patch(&date_key, &patch))
}

#[tauri::command]
pub fn toggle_tag(
    state: State<'_, AppState>,
    date_key: DateKey,
    field: TagField,
    value: String,
) -> Result<UpdateOutcome, String> {
    let entry = state.store.entry(&date_key);
    let next = toggled(field.current(&entry), &value);
    Ok(state.store.apply_patch(&date_key, &field.replacement_patch(next)))
}

#[tauri::command]
pub fn add_plant(
    state: State<'_, AppState>,
    date_key: DateKey,
    name: String,
) -> Result<UpdateOutcome, String> {
    let name = name.trim();
    if name.is_empty() {
        return Err("plant name is empty".into());
    }

    let entry = state.store.entry(&date_key);
    if entry.nutrition.plants.iter().any(|plant| plant == name) {
        // Already logged today; nothing to change.
        return Ok(UpdateOutcome {
            entry,
            persisted: true,
        });
    }

    let mut next = entry.nutrition.plants.clone();
    next.push(name.to_string());
    Ok(state
        .store
        .apply_patch(&date_key, &TagField::Plants.replacement_patch(next)))
}

#[tauri::command]
pub fn remove_plant(
    state: State<'_, AppState>,
    date_key: DateKey,
    name: String,
) -> Result<UpdateOutcome, String> {
    let entry = state.store.entry(&date_key);
    let next: Vec<String> = entry
        .nutrition
        .plants
        .iter()
        .filter(|plant| **plant != name)
        .cloned()
        .collect();
    Ok(state
        .store
        .apply_patch(&date_key, &TagField::Plants.replacement_patch(next)))
}

#[tauri::command]
pub fn adjust_water(
    state: State<'_, AppState>,
    date_key: DateKey,
    delta: i32,
) -> Result<UpdateOutcome, String> {
    let entry = state.store.entry(&date_key);
    let next = entry.habits.water.saturating_add_signed(delta);
    let patch = EntryPatch {
        habits: Some(HabitsPatch {
            water: Some(next),
            ..Default::default()
        }),
        ..Default::default()
    };
    Ok(state.store.apply_patch(&date_key, &patch))
}

/// Minutes slept on the given day, for the morning check-in banner.
#[tauri::command]
pub fn get_sleep_duration(
    state: State<'_, AppState>,
    date_key: DateKey,
) -> Result<Option<i64>, String> {
    Ok(state.store.entry(&date_key).sleep.duration_minutes())
}

#[tauri::command]
pub fn get_week(state: State<'_, AppState>, anchor_key: DateKey) -> Result<Vec<WeekDay>, String> {
    let monday = monday_of(anchor_key.as_date());
    Ok(state
        .store
        .week_entries(&monday)
        .into_iter()
        .map(|(date_key, entry)| WeekDay { date_key, entry })
        .collect())
}

#[tauri::command]
pub fn get_week_stats(
    state: State<'_, AppState>,
    anchor_key: DateKey,
) -> Result<WeekStats, String> {
    let monday = monday_of(anchor_key.as_date());
    Ok(state.store.week_stats(&monday))
}

#[tauri::command]
pub fn suggested_plants(
    state: State<'_, AppState>,
    date_key: DateKey,
) -> Result<Vec<String>, String> {
    let entry = state.store.entry(&date_key);
    Ok(crate::journal::vocab::COMMON_PLANTS
        .iter()
        .filter(|plant| !entry.nutrition.plants.iter().any(|logged| logged == *plant))
        .map(|plant| plant.to_string())
        .collect())
}

#[tauri::command]
pub fn get_tag_vocabulary() -> Result<TagVocabulary, String> {
    Ok(TagVocabulary::builtin())
}

#[tauri::command]
pub fn export_entries(app: AppHandle, state: State<'_, AppState>) -> Result<String, String> {
    let snapshot = state.store.export_snapshot().map_err(|e| e.to_string())?;

    let dir = app
        .path()
        .download_dir()
        .or_else(|_| app.path().app_data_dir())
        .map_err(|e| e.to_string())?;
    let path = dir.join(format!("{BACKUP_PREFIX}-{}.json", DateKey::today()));

    std::fs::write(&path, snapshot).map_err(|e| e.to_string())?;
    log::info!("Exported journal backup to {}", path.display());
    Ok(path.display().to_string())
}

#[tauri::command]
pub fn import_entries(state: State<'_, AppState>, contents: String) -> Result<usize, String> {
    let imported = state
        .store
        .replace_all(&contents)
        .map_err(|e| e.to_string())?;
    log::info!("Imported journal backup with {imported} day entries");
    Ok(imported)
}

#[tauri::command]
pub fn get_journal_status(state: State<'_, AppState>) -> Result<JournalStatus, String> {
    Ok(JournalStatus {
        entry_count: state.store.entry_count(),
        load_warning: state.store.load_warning().map(|w| w.to_string()),
    })
}
