//! Structured record list and its read-only query views

use crate::error::ValidationError;
use crate::ids::IdClock;
use crate::types::{RecordRow, StructuredRecord};
use serde::Serialize;
use std::cmp::Ordering;

/// Sort key standing in for a missing expiry date
pub const MISSING_EXPIRY_SORT_KEY: &str = "9999-99-99";

/// Field-level edit of one record; `None` leaves the field alone
#[derive(Debug, Clone, Default)]
pub struct RecordPatch {
    pub drug_name: Option<String>,
    pub brand_name: Option<String>,
    pub generic_name: Option<String>,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub specification: Option<String>,
    pub package_count: Option<String>,
    pub expiry_date: Option<String>,
}

impl RecordPatch {
    fn apply(self, record: &mut StructuredRecord) {
        let RecordPatch {
            drug_name,
            brand_name,
            generic_name,
            quantity,
            unit,
            specification,
            package_count,
            expiry_date,
        } = self;
        if let Some(v) = drug_name {
            record.drug_name = v;
        }
        if let Some(v) = brand_name {
            record.brand_name = v;
        }
        if let Some(v) = generic_name {
            record.generic_name = v;
        }
        if let Some(v) = quantity {
            record.quantity = v;
        }
        if let Some(v) = unit {
            record.unit = v;
        }
        if let Some(v) = specification {
            record.specification = v;
        }
        if let Some(v) = package_count {
            record.package_count = v;
        }
        if let Some(v) = expiry_date {
            record.expiry_date = v;
        }
    }
}

/// Ordering applied by [`RecordList::select`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordSort {
    DrugName,
    Expiry,
}

/// Combined record query: drug filter, then expiry bounds, then ordering.
/// Unset parts are skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordQuery {
    pub drug_name: Option<String>,
    pub before: Option<String>,
    pub after: Option<String>,
    pub sort: Option<RecordSort>,
    pub descending: bool,
}

impl RecordQuery {
    /// True when the query selects every record in stored order
    pub fn is_empty(&self) -> bool {
        self.drug_name.is_none()
            && self.before.is_none()
            && self.after.is_none()
            && self.sort.is_none()
    }
}

/// Field fill counts across a user's records
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Statistics {
    pub total: usize,
    pub with_brand_name: usize,
    pub with_generic_name: usize,
    pub with_specification: usize,
    pub with_expiry_date: usize,
}

/// Ordered list of structured records, oldest first
#[derive(Debug, Clone, Default)]
pub struct RecordList {
    records: Vec<StructuredRecord>,
    clock: IdClock,
}

impl RecordList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<StructuredRecord>) -> Self {
        let last = records.iter().map(|r| r.id).max().unwrap_or(0);
        Self {
            records,
            clock: IdClock::starting_after(last),
        }
    }

    /// Only valid records are accepted
    pub fn add(&mut self, record: StructuredRecord) -> Result<(), ValidationError> {
        if !record.is_valid() {
            return Err(ValidationError::MissingDrugName);
        }
        self.records.push(record);
        Ok(())
    }

    pub fn get_by_id(&self, id: i64) -> Option<&StructuredRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Returns false when no record has `id`. A patch that would blank the
    /// drug name is rejected and nothing changes.
    pub fn update_by_id(&mut self, id: i64, patch: RecordPatch) -> Result<bool, ValidationError> {
        if let Some(name) = &patch.drug_name {
            if name.trim().is_empty() {
                return Err(ValidationError::MissingDrugName);
            }
        }
        if let Some(q) = patch.quantity {
            if !q.is_finite() {
                return Err(ValidationError::InvalidQuantity(q));
            }
        }

        match self.records.iter_mut().find(|r| r.id == id) {
            Some(record) => {
                patch.apply(record);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn delete_by_id(&mut self, id: i64) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        self.records.len() < before
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Swap in a whole new list; invalid records are refused as a whole
    pub fn replace(&mut self, records: Vec<StructuredRecord>) -> Result<(), ValidationError> {
        if records.iter().any(|r| !r.is_valid()) {
            return Err(ValidationError::MissingDrugName);
        }
        let last = records.iter().map(|r| r.id).max().unwrap_or(0);
        self.records = records;
        self.clock = IdClock::starting_after(last);
        Ok(())
    }

    pub fn records(&self) -> &[StructuredRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clock_mut(&mut self) -> &mut IdClock {
        &mut self.clock
    }

    /// Newest first; `seq` counts down from `len` to 1
    pub fn to_rows(&self) -> Vec<RecordRow> {
        let total = self.records.len();
        self.records
            .iter()
            .rev()
            .enumerate()
            .map(|(i, r)| RecordRow {
                seq: total - i,
                record: r.clone(),
            })
            .collect()
    }

    /// Case-insensitive substring match on the drug name
    pub fn filter_by_drug_name(&self, query: &str) -> Vec<&StructuredRecord> {
        let needle = query.to_lowercase();
        self.records
            .iter()
            .filter(|r| drug_name_matches(r, &needle))
            .collect()
    }

    /// Inclusive string bounds on `expiry_date`. Records without an expiry
    /// date never satisfy a bound.
    pub fn filter_by_expiry(
        &self,
        before: Option<&str>,
        after: Option<&str>,
    ) -> Vec<&StructuredRecord> {
        self.records
            .iter()
            .filter(|r| expiry_within(r, before, after))
            .collect()
    }

    pub fn sort_by_drug_name(&self, descending: bool) -> Vec<&StructuredRecord> {
        let mut sorted: Vec<&StructuredRecord> = self.records.iter().collect();
        sort_records(&mut sorted, RecordSort::DrugName, descending);
        sorted
    }

    /// Lexicographic on the raw string; a missing date sorts as
    /// [`MISSING_EXPIRY_SORT_KEY`]
    pub fn sort_by_expiry(&self, descending: bool) -> Vec<&StructuredRecord> {
        let mut sorted: Vec<&StructuredRecord> = self.records.iter().collect();
        sort_records(&mut sorted, RecordSort::Expiry, descending);
        sorted
    }

    /// Apply every set part of `query` in one pass over the list.
    ///
    /// `descending` only matters together with a sort.
    pub fn select(&self, query: &RecordQuery) -> Vec<&StructuredRecord> {
        let needle = query.drug_name.as_deref().map(str::to_lowercase);
        let (before, after) = (query.before.as_deref(), query.after.as_deref());
        let mut selected: Vec<&StructuredRecord> = self
            .records
            .iter()
            .filter(|r| needle.as_deref().map_or(true, |n| drug_name_matches(r, n)))
            .filter(|r| expiry_within(r, before, after))
            .collect();
        if let Some(sort) = query.sort {
            sort_records(&mut selected, sort, query.descending);
        }
        selected
    }

    pub fn statistics(&self) -> Statistics {
        let mut stats = Statistics {
            total: self.records.len(),
            ..Default::default()
        };
        for r in &self.records {
            stats.with_brand_name += usize::from(!r.brand_name.is_empty());
            stats.with_generic_name += usize::from(!r.generic_name.is_empty());
            stats.with_specification += usize::from(!r.specification.is_empty());
            stats.with_expiry_date += usize::from(!r.expiry_date.is_empty());
        }
        stats
    }
}

fn drug_name_matches(record: &StructuredRecord, lowercase_needle: &str) -> bool {
    record.drug_name.to_lowercase().contains(lowercase_needle)
}

fn expiry_within(record: &StructuredRecord, before: Option<&str>, after: Option<&str>) -> bool {
    let date = record.expiry_date.as_str();
    let before_ok = match before.filter(|b| !b.is_empty()) {
        Some(b) => !date.is_empty() && date <= b,
        None => true,
    };
    let after_ok = match after.filter(|a| !a.is_empty()) {
        Some(a) => !date.is_empty() && date >= a,
        None => true,
    };
    before_ok && after_ok
}

fn sort_records(records: &mut [&StructuredRecord], sort: RecordSort, descending: bool) {
    match sort {
        RecordSort::DrugName => {
            records.sort_by(|a, b| directed(a.drug_name.cmp(&b.drug_name), descending))
        }
        RecordSort::Expiry => {
            records.sort_by(|a, b| directed(expiry_key(a).cmp(expiry_key(b)), descending))
        }
    }
}

fn expiry_key(record: &StructuredRecord) -> &str {
    if record.expiry_date.is_empty() {
        MISSING_EXPIRY_SORT_KEY
    } else {
        &record.expiry_date
    }
}

fn directed(ordering: Ordering, descending: bool) -> Ordering {
    if descending {
        ordering.reverse()
    } else {
        ordering
    }
}

/// Number query results 1..n in result order
pub fn number_rows(records: &[&StructuredRecord]) -> Vec<RecordRow> {
    records
        .iter()
        .enumerate()
        .map(|(i, r)| RecordRow {
            seq: i + 1,
            record: (*r).clone(),
        })
        .collect()
}
