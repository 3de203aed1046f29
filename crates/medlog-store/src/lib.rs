//! Per-user JSON file storage: layout, whole-file persistence and retention

mod io;
mod paths;
mod retention;
mod storage;

pub use io::{atomic_write, read_json_array, write_json_array, StoreError};
pub use paths::{
    csv_export_file, normalize_user, text_export_file, Paths, DEFAULT_USER, ENTRIES_PREFIX,
    RECORDS_PREFIX,
};
pub use retention::cleanup_expired;
pub use storage::JsonStorage;
