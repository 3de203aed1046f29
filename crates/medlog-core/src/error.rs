use thiserror::Error;

/// Rejected input to a mutating operation; the list is left unchanged
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("entry text must not be empty")]
    EmptyText,
    #[error("record has no drug name")]
    MissingDrugName,
    #[error("quantity must be a finite number, got {0}")]
    InvalidQuantity(f64),
    #[error("grid row {row}: {column} cell holds unusable value {value}")]
    GridCell {
        row: usize,
        column: &'static str,
        value: String,
    },
}
