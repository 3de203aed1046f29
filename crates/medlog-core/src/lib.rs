//! Data model, record lists, queries and configuration for medlog

mod config;
mod entries;
mod error;
pub mod export;
pub mod grid;
mod ids;
mod records;
mod types;

pub use config::{Config, LlmConfig};
pub use entries::EntryList;
pub use error::ValidationError;
pub use grid::GridRow;
pub use ids::{now_timestamp, IdClock, TIMESTAMP_FORMAT};
pub use records::{
    number_rows, RecordList, RecordPatch, RecordQuery, RecordSort, Statistics,
    MISSING_EXPIRY_SORT_KEY,
};
pub use types::{Entry, EntryRow, FieldMap, RecordRow, StructuredRecord, FALLBACK_CONFIDENCE};
