//! The entry store: the in-memory entry collection plus its write-through
//! persistence against a key-value blob collaborator.
//!
//! The whole journal is one JSON object on disk, keyed by date. It is read
//! once at startup and re-written in full after every mutation. The
//! in-memory collection is the source of truth for the session; a failed
//! write never rolls back an applied update.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::RwLock;

use anyhow::{Context, Result};
use log::warn;
use serde::Serialize;

use crate::datekey::DateKey;
use crate::journal::{week_stats, DayEntry, EntryPatch, WeekStats};

/// The single fixed key the journal blob lives under. Matches the legacy
/// web build, so its exported backups import cleanly.
pub const STORAGE_KEY: &str = "gizi-entries";

pub type EntryCollection = HashMap<DateKey, DayEntry>;

/// Key-value blob persistence, as the journal sees it.
pub trait BlobStore: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<String>>;
    fn write(&self, key: &str, contents: &str) -> Result<()>;
}

/// Blob store over plain files: key `k` lives at `<dir>/k.json`.
pub struct FileBlobStore {
    dir: PathBuf,
}

impl FileBlobStore {
    pub fn new(dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create data directory {}", dir.display()))?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl BlobStore for FileBlobStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        fs::read_to_string(&path)
            .map(Some)
            .with_context(|| format!("failed to read {}", path.display()))
    }

    fn write(&self, key: &str, contents: &str) -> Result<()> {
        let path = self.path_for(key);
        fs::write(&path, contents)
            .with_context(|| format!("failed to write {}", path.display()))
    }
}

/// Result of a mutating store call. `persisted` is the save-status signal
/// the frontend shows; the returned entry is committed in memory either way.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOutcome {
    pub entry: DayEntry,
    pub persisted: bool,
}

pub struct EntryStore {
    blob: Box<dyn BlobStore>,
    entries: RwLock<EntryCollection>,
    load_warning: Option<String>,
}

impl EntryStore {
    /// Reads the persisted collection once. An unreadable blob is not
    /// fatal: the store starts empty and keeps the warning around for the
    /// status surface.
    pub fn load(blob: Box<dyn BlobStore>) -> Self {
        let (entries, load_warning) = match blob.read(STORAGE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<EntryCollection>(&raw) {
                Ok(entries) => (entries, None),
                Err(err) => {
                    warn!("Stored journal is unreadable, starting empty: {err}");
                    (EntryCollection::new(), Some(err.to_string()))
                }
            },
            Ok(None) => (EntryCollection::new(), None),
            Err(err) => {
                warn!("Could not read stored journal, starting empty: {err:#}");
                (EntryCollection::new(), Some(format!("{err:#}")))
            }
        };

        Self {
            blob,
            entries: RwLock::new(entries),
            load_warning,
        }
    }

    pub fn load_warning(&self) -> Option<&str> {
        self.load_warning.as_deref()
    }

    pub fn entry_count(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    /// The presented entry for a date: the stored record, or a fully
    /// defaulted one when nothing is logged yet. Always a detached copy.
    pub fn entry(&self, date: &DateKey) -> DayEntry {
        self.entries
            .read()
            .unwrap()
            .get(date)
            .cloned()
            .unwrap_or_default()
    }

    /// Merges `patch` into the entry for `date`, commits the result, and
    /// writes the whole collection through to the blob store. The write
    /// happens under the collection lock, so persisted snapshots can never
    /// go out backwards even when updates race.
    pub fn apply_patch(&self, date: &DateKey, patch: &EntryPatch) -> UpdateOutcome {
        let mut entries = self.entries.write().unwrap();
        let updated = entries
            .get(date)
            .cloned()
            .unwrap_or_default()
            .merged(patch);
        entries.insert(date.clone(), updated.clone());

        let persisted = match self.persist(&entries) {
            Ok(()) => true,
            Err(err) => {
                warn!("Failed to persist journal after updating {date}: {err:#}");
                false
            }
        };

        UpdateOutcome {
            entry: updated,
            persisted,
        }
    }

    /// Wholesale replacement from an imported backup. Rejects input that is
    /// not a date-keyed mapping of entry-shaped objects, leaving the
    /// current collection untouched. Returns the number of imported days.
    pub fn replace_all(&self, raw: &str) -> Result<usize> {
        let imported: EntryCollection =
            serde_json::from_str(raw).context("import data is not a valid journal backup")?;

        let mut entries = self.entries.write().unwrap();
        *entries = imported;
        if let Err(err) = self.persist(&entries) {
            warn!("Failed to persist journal after import: {err:#}");
        }
        Ok(entries.len())
    }

    /// The canonical serialized collection, byte-compatible with what
    /// `load` and `replace_all` accept.
    pub fn export_snapshot(&self) -> Result<String> {
        let entries = self.entries.read().unwrap();
        serde_json::to_string_pretty(&*entries).context("failed to serialize journal")
    }

    /// The presented entries of the week window starting at `monday`.
    pub fn week_entries(&self, monday: &DateKey) -> Vec<(DateKey, DayEntry)> {
        let entries = self.entries.read().unwrap();
        crate::datekey::week_dates(monday)
            .into_iter()
            .map(|date| {
                let entry = entries.get(&date).cloned().unwrap_or_default();
                (date, entry)
            })
            .collect()
    }

    /// Weekly statistics over the current collection snapshot.
    pub fn week_stats(&self, monday: &DateKey) -> WeekStats {
        let entries = self.entries.read().unwrap();
        week_stats(&entries, monday)
    }

    fn persist(&self, entries: &EntryCollection) -> Result<()> {
        let serialized = serde_json::to_string_pretty(entries)?;
        self.blob.write(STORAGE_KEY, &serialized)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::journal::{DayColor, HabitsPatch};

    /// In-memory collaborator standing in for the on-disk blob. Clones
    /// share contents, so tests can keep a handle after the store takes
    /// ownership of its copy.
    #[derive(Clone, Default)]
    struct MemoryBlob {
        contents: Arc<Mutex<HashMap<String, String>>>,
    }

    impl MemoryBlob {
        fn seeded(raw: &str) -> Self {
            let blob = Self::default();
            blob.contents
                .lock()
                .unwrap()
                .insert(STORAGE_KEY.to_string(), raw.to_string());
            blob
        }
    }

    impl BlobStore for MemoryBlob {
        fn read(&self, key: &str) -> Result<Option<String>> {
            Ok(self.contents.lock().unwrap().get(key).cloned())
        }

        fn write(&self, key: &str, contents: &str) -> Result<()> {
            self.contents
                .lock()
                .unwrap()
                .insert(key.to_string(), contents.to_string());
            Ok(())
        }
    }

    /// Collaborator whose writes always fail, for save-status tests.
    struct ReadOnlyBlob;

    impl BlobStore for ReadOnlyBlob {
        fn read(&self, _key: &str) -> Result<Option<String>> {
            Ok(None)
        }

        fn write(&self, _key: &str, _contents: &str) -> Result<()> {
            Err(anyhow::anyhow!("disk full"))
        }
    }

    fn key(s: &str) -> DateKey {
        s.parse().expect("test key should parse")
    }

    fn water_patch(water: u32) -> EntryPatch {
        EntryPatch {
            habits: Some(HabitsPatch {
                water: Some(water),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn unknown_dates_present_as_fully_defaulted_entries() {
        let store = EntryStore::load(Box::new(MemoryBlob::default()));
        assert_eq!(store.entry(&key("2024-06-05")), DayEntry::default());
    }

    #[test]
    fn successive_patches_accumulate_on_one_day() {
        let store = EntryStore::load(Box::new(MemoryBlob::default()));
        let date = key("2024-06-05");

        store.apply_patch(&date, &water_patch(3));
        store.apply_patch(
            &date,
            &EntryPatch {
                day_color: Some(DayColor::Green),
                ..Default::default()
            },
        );

        let entry = store.entry(&date);
        assert_eq!(entry.habits.water, 3);
        assert_eq!(entry.day_color, DayColor::Green);
        // Untouched fields stay at their defaults.
        assert_eq!(entry.sleep.bedtime, "");
    }

    #[test]
    fn every_mutation_writes_the_whole_collection_through() {
        let blob = MemoryBlob::default();
        let store = EntryStore::load(Box::new(blob.clone()));
        store.apply_patch(&key("2024-06-05"), &water_patch(2));
        store.apply_patch(&key("2024-06-06"), &water_patch(4));

        let written = blob.read(STORAGE_KEY).unwrap().unwrap();
        let persisted: EntryCollection = serde_json::from_str(&written).unwrap();
        assert_eq!(persisted.len(), 2);
        assert_eq!(persisted[&key("2024-06-05")].habits.water, 2);
        assert_eq!(persisted[&key("2024-06-06")].habits.water, 4);
    }

    #[test]
    fn persist_failure_reports_but_keeps_the_update() {
        let store = EntryStore::load(Box::new(ReadOnlyBlob));
        let date = key("2024-06-05");

        let outcome = store.apply_patch(&date, &water_patch(7));
        assert!(!outcome.persisted);
        assert_eq!(outcome.entry.habits.water, 7);
        // In-memory state stays authoritative for the session.
        assert_eq!(store.entry(&date).habits.water, 7);
    }

    #[test]
    fn load_accepts_sparse_legacy_records() {
        let raw = r#"{"2024-06-05":{"habits":{"water":3},"dayColor":"Yellow"}}"#;
        let store = EntryStore::load(Box::new(MemoryBlob::seeded(raw)));

        let entry = store.entry(&key("2024-06-05"));
        assert_eq!(entry.habits.water, 3);
        assert_eq!(entry.day_color, DayColor::Yellow);
        assert_eq!(entry.wellbeing.energy, 5);
        assert!(store.load_warning().is_none());
    }

    #[test]
    fn load_falls_back_to_empty_on_a_corrupt_blob() {
        let store = EntryStore::load(Box::new(MemoryBlob::seeded("{not json")));
        assert_eq!(store.entry_count(), 0);
        assert!(store.load_warning().is_some());
        // Still usable with zero history.
        let outcome = store.apply_patch(&key("2024-06-05"), &water_patch(1));
        assert!(outcome.persisted);
    }

    #[test]
    fn import_rejects_malformed_data_and_preserves_state() {
        let store = EntryStore::load(Box::new(MemoryBlob::default()));
        let date = key("2024-06-05");
        store.apply_patch(&date, &water_patch(3));

        assert!(store.replace_all("{broken").is_err());
        assert!(store.replace_all(r#"{"2024-06-05": 3}"#).is_err());
        assert!(store.replace_all(r#"{"someday": {}}"#).is_err());

        assert_eq!(store.entry(&date).habits.water, 3);
        assert_eq!(store.entry_count(), 1);
    }

    #[test]
    fn export_import_round_trips_every_entry() {
        let store = EntryStore::load(Box::new(MemoryBlob::default()));
        store.apply_patch(&key("2024-06-05"), &water_patch(3));
        store.apply_patch(
            &key("2024-06-06"),
            &EntryPatch {
                day_color: Some(DayColor::Red),
                tomorrow_goal: Some("sleep early".into()),
                ..Default::default()
            },
        );
        let before_05 = store.entry(&key("2024-06-05"));
        let before_06 = store.entry(&key("2024-06-06"));

        let snapshot = store.export_snapshot().unwrap();
        let imported = store.replace_all(&snapshot).unwrap();

        assert_eq!(imported, 2);
        assert_eq!(store.entry(&key("2024-06-05")), before_05);
        assert_eq!(store.entry(&key("2024-06-06")), before_06);
    }

    #[test]
    fn week_entries_presents_all_seven_days() {
        let store = EntryStore::load(Box::new(MemoryBlob::default()));
        store.apply_patch(&key("2024-06-04"), &water_patch(2));

        let week = store.week_entries(&key("2024-06-03"));
        assert_eq!(week.len(), 7);
        assert_eq!(week[0].0, key("2024-06-03"));
        assert_eq!(week[1].1.habits.water, 2);
        assert_eq!(week[6].1, DayEntry::default());
    }

    #[test]
    fn file_blob_store_round_trips_under_its_key() {
        static DIR_SEQ: AtomicUsize = AtomicUsize::new(0);
        let dir = std::env::temp_dir().join(format!(
            "gizi-store-test-{}-{}",
            std::process::id(),
            DIR_SEQ.fetch_add(1, Ordering::Relaxed)
        ));
        let blob = FileBlobStore::new(dir.clone()).unwrap();

        assert!(blob.read(STORAGE_KEY).unwrap().is_none());
        blob.write(STORAGE_KEY, "{}").unwrap();
        assert_eq!(blob.read(STORAGE_KEY).unwrap().as_deref(), Some("{}"));
        assert!(dir.join(format!("{STORAGE_KEY}.json")).exists());

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
