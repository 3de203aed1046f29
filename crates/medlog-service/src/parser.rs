//! Structured records per user and the entry-to-record pipeline

use crate::error::ServiceError;
use crate::session::SessionStore;
use medlog_core::export::{export_stamp, render_csv};
use medlog_core::grid::{records_from_grid, GridRow};
use medlog_core::{
    now_timestamp, number_rows, Entry, RecordList, RecordPatch, RecordQuery, RecordRow,
    Statistics, StructuredRecord,
};
use medlog_extract::FieldExtractor;
use medlog_store::{atomic_write, csv_export_file, JsonStorage, Paths};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// Result of one [`ParserService::parse_and_save`] run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParseOutcome {
    pub success_count: usize,
    pub failure_count: usize,
    /// Original texts of the entries that produced no record
    pub failures: Vec<String>,
    /// Whether the record list reached disk
    pub saved: bool,
}

pub struct ParserService {
    paths: Paths,
    sessions: SessionStore<RecordList>,
    extractor: Box<dyn FieldExtractor>,
    batch_size: usize,
}

impl ParserService {
    /// A `batch_size` of 0 is treated as 1
    pub fn new(paths: Paths, extractor: Box<dyn FieldExtractor>, batch_size: usize) -> Self {
        Self {
            paths,
            sessions: SessionStore::new(),
            extractor,
            batch_size: batch_size.max(1),
        }
    }

    fn storage(&self, user: &str) -> JsonStorage {
        JsonStorage::new(self.paths.records_file(user))
    }

    fn list(&mut self, user: &str) -> &mut RecordList {
        let paths = &self.paths;
        self.sessions.get_or_load(user, |u| {
            RecordList::from_records(JsonStorage::new(paths.records_file(u)).load())
        })
    }

    fn save(&mut self, user: &str) -> bool {
        let storage = self.storage(user);
        storage.save(self.list(user).records())
    }

    fn persist(&mut self, user: &str) -> Result<(), ServiceError> {
        if self.save(user) {
            Ok(())
        } else {
            Err(ServiceError::Persistence {
                path: self.paths.records_file(user),
            })
        }
    }

    /// Structure `entries` and store the results for `user`.
    ///
    /// Entries go to the extractor in chunks of `batch_size`. Without
    /// `append` the user's existing records are replaced.
    pub fn parse_and_save(&mut self, user: &str, entries: &[Entry], append: bool) -> ParseOutcome {
        info!(
            user,
            count = entries.len(),
            batch_size = self.batch_size,
            append,
            "parsing entries"
        );

        let mut failures = Vec::new();
        let mut built = Vec::new();
        for (index, chunk) in entries.chunks(self.batch_size).enumerate() {
            let (sendable, blank): (Vec<&Entry>, Vec<&Entry>) =
                chunk.iter().partition(|e| !e.text.trim().is_empty());
            failures.extend(blank.iter().map(|e| e.text.clone()));
            if sendable.is_empty() {
                continue;
            }

            let texts: Vec<String> = sendable.iter().map(|e| e.text.clone()).collect();
            let fields = match self.extractor.extract_batch(&texts) {
                Ok(fields) if fields.len() == texts.len() => fields,
                Ok(fields) => {
                    warn!(
                        chunk = index,
                        expected = texts.len(),
                        got = fields.len(),
                        "extractor returned wrong result count"
                    );
                    failures.extend(texts);
                    continue;
                }
                Err(e) => {
                    warn!(chunk = index, error = %e, "chunk extraction failed");
                    failures.extend(texts);
                    continue;
                }
            };

            let clock = self.list(user).clock_mut();
            for (entry, fields) in sendable.into_iter().zip(fields) {
                let id = clock.next_id();
                match StructuredRecord::from_fields(&entry.text, fields, id, now_timestamp()) {
                    Ok(record) => built.push(record),
                    Err(e) => {
                        warn!(id = entry.id, error = %e, "no record for entry");
                        failures.push(entry.text.clone());
                    }
                }
            }
        }

        let list = self.list(user);
        if !append {
            list.clear();
        }
        let mut success_count = 0;
        for record in built {
            let text = record.original_text.clone();
            match list.add(record) {
                Ok(()) => success_count += 1,
                Err(_) => failures.push(text),
            }
        }

        let saved = self.save(user);
        info!(user, success_count, failure_count = failures.len(), saved, "parse finished");
        ParseOutcome {
            success_count,
            failure_count: failures.len(),
            failures,
            saved,
        }
    }

    /// Oldest first
    pub fn records(&mut self, user: &str) -> &[StructuredRecord] {
        self.list(user).records()
    }

    pub fn record_rows(&mut self, user: &str) -> Vec<RecordRow> {
        self.list(user).to_rows()
    }

    pub fn get_record(&mut self, user: &str, id: i64) -> Option<StructuredRecord> {
        self.list(user).get_by_id(id).cloned()
    }

    /// `Ok(false)` when no record has `id`
    pub fn update_record(
        &mut self,
        user: &str,
        id: i64,
        patch: RecordPatch,
    ) -> Result<bool, ServiceError> {
        if !self.list(user).update_by_id(id, patch)? {
            return Ok(false);
        }
        self.persist(user)?;
        Ok(true)
    }

    pub fn delete_record(&mut self, user: &str, id: i64) -> Result<bool, ServiceError> {
        if !self.list(user).delete_by_id(id) {
            return Ok(false);
        }
        self.persist(user)?;
        Ok(true)
    }

    pub fn filter_by_drug_name(&mut self, user: &str, query: &str) -> Vec<RecordRow> {
        number_rows(&self.list(user).filter_by_drug_name(query))
    }

    pub fn filter_by_expiry(
        &mut self,
        user: &str,
        before: Option<&str>,
        after: Option<&str>,
    ) -> Vec<RecordRow> {
        number_rows(&self.list(user).filter_by_expiry(before, after))
    }

    pub fn sort_by_drug_name(&mut self, user: &str, descending: bool) -> Vec<RecordRow> {
        number_rows(&self.list(user).sort_by_drug_name(descending))
    }

    pub fn sort_by_expiry(&mut self, user: &str, descending: bool) -> Vec<RecordRow> {
        number_rows(&self.list(user).sort_by_expiry(descending))
    }

    /// Rows for a combined query. An empty query gives the plain listing
    /// (newest first, `seq` counting down); otherwise results are numbered
    /// 1..n in query order.
    pub fn query_records(&mut self, user: &str, query: &RecordQuery) -> Vec<RecordRow> {
        let list = self.list(user);
        if query.is_empty() {
            list.to_rows()
        } else {
            number_rows(&list.select(query))
        }
    }

    /// Replace the user's records with a grid snapshot; returns the new count.
    /// A rejected snapshot leaves the stored list untouched.
    pub fn update_from_grid(&mut self, user: &str, rows: &[GridRow]) -> Result<usize, ServiceError> {
        let list = self.list(user);
        let records = records_from_grid(rows, list.clock_mut())?;
        list.replace(records)?;
        let count = list.len();
        info!(user, count, "records replaced from grid");
        self.persist(user)?;
        Ok(count)
    }

    pub fn statistics(&mut self, user: &str) -> Statistics {
        self.list(user).statistics()
    }

    pub fn clear_all(&mut self, user: &str) -> Result<(), ServiceError> {
        self.list(user).clear();
        info!(user, "records cleared");
        self.persist(user)
    }

    /// Drop the cached list and reread the file
    pub fn refresh(&mut self, user: &str) -> usize {
        let paths = &self.paths;
        self.sessions
            .load(user, |u| {
                RecordList::from_records(JsonStorage::new(paths.records_file(u)).load())
            })
            .len()
    }

    /// Write the CSV export into `dir`; `None` when there is nothing to export
    pub fn export_csv(&mut self, user: &str, dir: &Path) -> Result<Option<PathBuf>, ServiceError> {
        let rows = self.record_rows(user);
        if rows.is_empty() {
            return Ok(None);
        }

        let path = csv_export_file(dir, user, &export_stamp());
        if let Err(e) = atomic_write(&path, render_csv(&rows).as_bytes()) {
            error!(path = %path.display(), error = %e, "CSV export failed");
            return Err(ServiceError::Persistence { path });
        }
        info!(user, path = %path.display(), count = rows.len(), "records exported");
        Ok(Some(path))
    }
}
