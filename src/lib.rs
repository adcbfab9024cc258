mod datekey;
mod journal;
mod store;

use journal::commands::{
    add_plant, adjust_water, export_entries, get_entry, get_journal_status, get_sleep_duration,
    get_tag_vocabulary, get_week, get_week_stats, import_entries, remove_plant, suggested_plants,
    toggle_tag, update_entry,
};
use store::{EntryStore, FileBlobStore};
use tauri::Manager;

pub(crate) struct AppState {
    pub(crate) store: EntryStore,
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    // Initialize logging (reads RUST_LOG env var)
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Gizi starting up...");

    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .setup(|app| {
            let result = (|| -> anyhow::Result<()> {
                let app_data_dir = app
                    .path()
                    .app_data_dir()
                    .map_err(|err| anyhow::anyhow!(err))?;

                let blob = FileBlobStore::new(app_data_dir)?;
                let store = EntryStore::load(Box::new(blob));
                log::info!("Journal ready with {} day entries", store.entry_count());

                app.manage(AppState { store });
                Ok(())
            })();

            result.map_err(|err| err.into())
        })
        .invoke_handler(tauri::generate_handler![
            get_entry,
            update_entry,
            get_sleep_duration,
            toggle_tag,
            add_plant,
            remove_plant,
            adjust_water,
            get_week,
            get_week_stats,
            suggested_plants,
            get_tag_vocabulary,
            export_entries,
            import_entries,
            get_journal_status,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
