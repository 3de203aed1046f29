//! Retention sweep over per-user data files

use crate::paths::{ENTRIES_PREFIX, RECORDS_PREFIX};
use std::path::Path;
use std::time::{Duration, SystemTime};
use tracing::{error, info};

const SECS_PER_DAY: u64 = 24 * 60 * 60;

fn is_user_data_file(name: &str) -> bool {
    name.ends_with(".json") && (name.starts_with(ENTRIES_PREFIX) || name.starts_with(RECORDS_PREFIX))
}

/// Delete per-user data files not modified within `retention_days`.
///
/// Returns the number of files removed. A retention longer than the clock
/// can represent keeps everything.
pub fn cleanup_expired(data_dir: &Path, retention_days: u64) -> usize {
    if !data_dir.exists() {
        return 0;
    }

    info!(days = retention_days, "sweeping expired data files");
    let cutoff = SystemTime::now()
        .checked_sub(Duration::from_secs(
            retention_days.saturating_mul(SECS_PER_DAY),
        ))
        .unwrap_or(SystemTime::UNIX_EPOCH);

    let read_dir = match std::fs::read_dir(data_dir) {
        Ok(rd) => rd,
        Err(e) => {
            error!(dir = %data_dir.display(), error = %e, "failed to read data directory");
            return 0;
        }
    };

    let mut removed = 0;
    for dir_entry in read_dir.flatten() {
        let name = dir_entry.file_name().to_string_lossy().to_string();
        if !is_user_data_file(&name) {
            continue;
        }

        let modified = match dir_entry.metadata().and_then(|m| m.modified()) {
            Ok(t) => t,
            Err(e) => {
                error!(file = %name, error = %e, "failed to read modification time");
                continue;
            }
        };
        if modified >= cutoff {
            continue;
        }

        match std::fs::remove_file(dir_entry.path()) {
            Ok(()) => {
                info!(file = %name, "deleted expired data file");
                removed += 1;
            }
            Err(e) => error!(file = %name, error = %e, "failed to delete expired file"),
        }
    }

    info!(removed, "retention sweep finished");
    removed
}
