pub mod page_watcher;
pub mod settings_check;
pub mod settings_store;
pub mod solution_extractor;
pub mod sync_coordinator;
pub mod uploader;

pub use page_watcher::PageWatcher;
pub use settings_check::{check_settings, import_settings, SettingsStatus};
pub use settings_store::{SettingsStore, TomlSettingsStore};
pub use solution_extractor::{normalize_code, Extraction, ExtractionState, SolutionExtractor};
pub use sync_coordinator::{resolve_file_name, CoordinatorHandle, SyncCoordinator};
pub use uploader::SolutionUploader;
