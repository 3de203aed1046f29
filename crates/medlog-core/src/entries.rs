//! Raw entry list

use crate::error::ValidationError;
use crate::ids::{now_timestamp, IdClock};
use crate::types::{Entry, EntryRow};

/// Ordered list of raw entries, oldest first
#[derive(Debug, Clone, Default)]
pub struct EntryList {
    entries: Vec<Entry>,
    clock: IdClock,
}

impl EntryList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap loaded entries; new ids will sort after every existing one
    pub fn from_entries(entries: Vec<Entry>) -> Self {
        let last = entries.iter().map(|e| e.id).max().unwrap_or(0);
        Self {
            entries,
            clock: IdClock::starting_after(last),
        }
    }

    pub fn add(&mut self, text: &str) -> Result<Entry, ValidationError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::EmptyText);
        }

        let entry = Entry {
            id: self.clock.next_id(),
            text: text.to_string(),
            timestamp: now_timestamp(),
        };
        self.entries.push(entry.clone());
        Ok(entry)
    }

    pub fn delete_by_id(&mut self, id: i64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() < before
    }

    /// Returns false when no entry has `id`
    pub fn update_by_id(&mut self, id: i64, new_text: &str) -> Result<bool, ValidationError> {
        let new_text = new_text.trim();
        if new_text.is_empty() {
            return Err(ValidationError::EmptyText);
        }

        match self.entries.iter_mut().find(|e| e.id == id) {
            Some(entry) => {
                entry.text = new_text.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn get_by_id(&self, id: i64) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Swap in a whole new list, e.g. from a grid snapshot
    pub fn replace(&mut self, entries: Vec<Entry>) {
        let last = entries.iter().map(|e| e.id).max().unwrap_or(0);
        self.entries = entries;
        self.clock = IdClock::starting_after(last);
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    /// Newest first
    pub fn reversed(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clock_mut(&mut self) -> &mut IdClock {
        &mut self.clock
    }

    /// Newest first; `seq` counts down from `len` to 1
    pub fn to_rows(&self) -> Vec<EntryRow> {
        let total = self.entries.len();
        self.reversed()
            .enumerate()
            .map(|(i, e)| EntryRow {
                seq: total - i,
                text: e.text.clone(),
                timestamp: e.timestamp.clone(),
                id: e.id,
            })
            .collect()
    }
}
