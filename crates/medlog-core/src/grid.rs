//! Decoding of grid snapshots submitted by the presentation layer
//!
//! A snapshot is a list of rows, each a list of JSON cells, in the order the
//! grid displayed them (newest first for entries).

use crate::error::ValidationError;
use crate::ids::{now_timestamp, IdClock};
use crate::types::{Entry, StructuredRecord};
use serde_json::Value;

pub type GridRow = Vec<Value>;

const ENTRY_COLUMNS: usize = 4;
const RECORD_MIN_COLUMNS: usize = 10;

/// Text content of a cell; blank cells and the literal "none" read as absent
fn cell_text(cell: &Value) -> Option<String> {
    let text = match cell {
        Value::Null => return None,
        Value::String(s) => s.trim().to_string(),
        other => other.to_string(),
    };
    if text.is_empty() || text.eq_ignore_ascii_case("none") {
        None
    } else {
        Some(text)
    }
}

/// Largest float that still holds every smaller integer exactly
const MAX_FLOAT_ID: f64 = 9_007_199_254_740_992.0;

/// Integer id from a numeric cell or a numeric string, truncating fractions.
///
/// Values outside the id range are rejected rather than clamped, so the
/// clock never starts next to `i64::MAX`.
fn cell_id(cell: &Value) -> Option<i64> {
    let id = match cell {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(float_id)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(float_id))
        }
        _ => None,
    }?;
    (id != i64::MAX && id != i64::MIN).then_some(id)
}

fn float_id(f: f64) -> Option<i64> {
    (f.is_finite() && f.abs() < MAX_FLOAT_ID).then(|| f.trunc() as i64)
}

fn cell_quantity(cell: &Value, row: usize) -> Result<f64, ValidationError> {
    let bad = || ValidationError::GridCell {
        row,
        column: "quantity",
        value: cell.to_string(),
    };
    match cell {
        Value::Number(n) => n.as_f64().ok_or_else(bad),
        other => match cell_text(other) {
            None => Ok(0.0),
            Some(s) => s
                .parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .ok_or_else(bad),
        },
    }
}

/// Rebuild entries from a `[seq, text, timestamp, id]` snapshot.
///
/// Short rows and rows with blank text are dropped. Unusable ids get a fresh
/// one from `clock`, blank timestamps get the current time. The result is in
/// storage order (oldest first).
pub fn entries_from_grid(rows: &[GridRow], clock: &mut IdClock) -> Vec<Entry> {
    let mut entries: Vec<Entry> = rows
        .iter()
        .filter(|row| row.len() >= ENTRY_COLUMNS)
        .filter_map(|row| {
            let text = cell_text(&row[1])?;
            let id = cell_id(&row[3]).unwrap_or_else(|| clock.next_id());
            let timestamp = cell_text(&row[2]).unwrap_or_else(now_timestamp);
            Some(Entry { id, text, timestamp })
        })
        .collect();
    entries.reverse();
    entries
}

/// Rebuild records from an eleven-column structured snapshot:
/// `[#, drug_name, brand_name, generic_name, quantity, unit, specification,
/// package_count, expiry_date, original_text, timestamp]`.
///
/// Every record gets a fresh id. Rows with fewer than ten cells or a blank
/// drug name are dropped. An unreadable quantity rejects the whole snapshot.
pub fn records_from_grid(
    rows: &[GridRow],
    clock: &mut IdClock,
) -> Result<Vec<StructuredRecord>, ValidationError> {
    let mut records = Vec::new();
    for (index, row) in rows.iter().enumerate() {
        if row.len() < RECORD_MIN_COLUMNS {
            continue;
        }
        let text = |i: usize| cell_text(&row[i]).unwrap_or_default();

        let quantity = cell_quantity(&row[4], index + 1)?;
        let drug_name = text(1);
        if drug_name.is_empty() {
            continue;
        }
        let timestamp = row
            .get(10)
            .and_then(cell_text)
            .unwrap_or_else(now_timestamp);

        records.push(StructuredRecord {
            id: clock.next_id(),
            original_text: text(9),
            drug_name,
            brand_name: text(2),
            generic_name: text(3),
            quantity,
            unit: text(5),
            specification: text(6),
            package_count: text(7),
            expiry_date: text(8),
            timestamp,
            confidence: 1.0,
        });
    }
    Ok(records)
}
