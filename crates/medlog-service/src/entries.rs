//! Raw entry operations per user

use crate::error::ServiceError;
use crate::session::SessionStore;
use medlog_core::export::{export_stamp, render_text};
use medlog_core::grid::{entries_from_grid, GridRow};
use medlog_core::{Entry, EntryList, EntryRow};
use medlog_store::{atomic_write, text_export_file, JsonStorage, Paths};
use std::path::{Path, PathBuf};
use tracing::{error, info};

pub struct EntryService {
    paths: Paths,
    sessions: SessionStore<EntryList>,
}

impl EntryService {
    pub fn new(paths: Paths) -> Self {
        Self {
            paths,
            sessions: SessionStore::new(),
        }
    }

    fn storage(&self, user: &str) -> JsonStorage {
        JsonStorage::new(self.paths.entries_file(user))
    }

    fn list(&mut self, user: &str) -> &mut EntryList {
        let paths = &self.paths;
        self.sessions.get_or_load(user, |u| {
            EntryList::from_entries(JsonStorage::new(paths.entries_file(u)).load())
        })
    }

    fn persist(&mut self, user: &str) -> Result<(), ServiceError> {
        let storage = self.storage(user);
        let saved = storage.save(self.list(user).entries());
        if saved {
            Ok(())
        } else {
            Err(ServiceError::Persistence {
                path: storage.path().to_path_buf(),
            })
        }
    }

    pub fn add_entry(&mut self, user: &str, text: &str) -> Result<Entry, ServiceError> {
        let entry = self.list(user).add(text)?;
        info!(user, id = entry.id, "entry added");
        self.persist(user)?;
        Ok(entry)
    }

    /// `Ok(false)` when no entry has `id`
    pub fn update_entry(&mut self, user: &str, id: i64, text: &str) -> Result<bool, ServiceError> {
        if !self.list(user).update_by_id(id, text)? {
            return Ok(false);
        }
        self.persist(user)?;
        Ok(true)
    }

    pub fn delete_entry(&mut self, user: &str, id: i64) -> Result<bool, ServiceError> {
        if !self.list(user).delete_by_id(id) {
            return Ok(false);
        }
        self.persist(user)?;
        Ok(true)
    }

    pub fn get_entry(&mut self, user: &str, id: i64) -> Option<Entry> {
        self.list(user).get_by_id(id).cloned()
    }

    /// Oldest first
    pub fn entries(&mut self, user: &str) -> &[Entry] {
        self.list(user).entries()
    }

    pub fn rows(&mut self, user: &str) -> Vec<EntryRow> {
        self.list(user).to_rows()
    }

    pub fn count(&mut self, user: &str) -> usize {
        self.list(user).len()
    }

    pub fn clear_all(&mut self, user: &str) -> Result<(), ServiceError> {
        self.list(user).clear();
        info!(user, "entries cleared");
        self.persist(user)
    }

    /// Replace the user's entries with a grid snapshot; returns the new count
    pub fn save_grid(&mut self, user: &str, rows: &[GridRow]) -> Result<usize, ServiceError> {
        let list = self.list(user);
        let entries = entries_from_grid(rows, list.clock_mut());
        list.replace(entries);
        let count = list.len();
        info!(user, count, "entries replaced from grid");
        self.persist(user)?;
        Ok(count)
    }

    /// Drop the cached list and reread the file
    pub fn refresh(&mut self, user: &str) -> usize {
        let paths = &self.paths;
        self.sessions
            .load(user, |u| {
                EntryList::from_entries(JsonStorage::new(paths.entries_file(u)).load())
            })
            .len()
    }

    /// Write the numbered text list into `dir`; `None` when there is nothing
    /// to export
    pub fn export_text(&mut self, user: &str, dir: &Path) -> Result<Option<PathBuf>, ServiceError> {
        let list = self.list(user);
        if list.is_empty() {
            return Ok(None);
        }

        let path = text_export_file(dir, &export_stamp());
        if let Err(e) = atomic_write(&path, render_text(list.entries()).as_bytes()) {
            error!(path = %path.display(), error = %e, "text export failed");
            return Err(ServiceError::Persistence { path });
        }
        info!(user, path = %path.display(), "entries exported");
        Ok(Some(path))
    }
}
