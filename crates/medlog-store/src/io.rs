//! JSON array I/O and atomic file operations

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected a JSON array, found {0}")]
    NotArray(&'static str),
}

fn kind_of(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// Read every record from a file holding a single JSON array.
///
/// A missing file reads as an empty list. Anything other than an array whose
/// elements all decode as `T` is an error; nothing is partially recovered.
pub fn read_json_array<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<Vec<T>, StoreError> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let content = std::fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&content)?;
    if !value.is_array() {
        return Err(StoreError::NotArray(kind_of(&value)));
    }
    Ok(serde_json::from_value(value)?)
}

/// Serialize the whole list as a pretty-printed JSON array and replace the file.
pub fn write_json_array<T: Serialize>(path: &Path, records: &[T]) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(records)?;
    atomic_write(path, json.as_bytes())?;
    Ok(())
}

/// Write data atomically using temp file + rename
pub fn atomic_write(path: &Path, data: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let temp_path = path.with_extension("tmp");
    std::fs::write(&temp_path, data)?;
    std::fs::rename(temp_path, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct TestRecord {
        id: u32,
        name: String,
    }

    #[test]
    fn test_json_array_roundtrip() {
        let temp = tempfile::TempDir::new().unwrap();
        let test_file = temp.path().join("roundtrip.json");

        let records = vec![
            TestRecord {
                id: 1,
                name: "阿莫西林".to_string(),
            },
            TestRecord {
                id: 2,
                name: "Bob".to_string(),
            },
        ];

        write_json_array(&test_file, &records).unwrap();
        let read_records: Vec<TestRecord> = read_json_array(&test_file).unwrap();
        assert_eq!(records, read_records);

        // Non-ASCII text is written as-is
        let raw = std::fs::read_to_string(&test_file).unwrap();
        assert!(raw.contains("阿莫西林"));
    }

    #[test]
    fn test_missing_file_reads_empty() {
        let temp = tempfile::TempDir::new().unwrap();
        let records: Vec<TestRecord> = read_json_array(&temp.path().join("nope.json")).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_object_is_not_array() {
        let temp = tempfile::TempDir::new().unwrap();
        let test_file = temp.path().join("object.json");
        std::fs::write(&test_file, r#"{"id": 1, "name": "x"}"#).unwrap();

        let result: Result<Vec<TestRecord>, _> = read_json_array(&test_file);
        assert!(matches!(result, Err(StoreError::NotArray("an object"))));
    }

    #[test]
    fn test_atomic_write() {
        let temp = tempfile::TempDir::new().unwrap();
        let test_file = temp.path().join("nested").join("atomic.txt");

        let data = b"Hello, world!";
        atomic_write(&test_file, data).unwrap();

        let read_data = std::fs::read(&test_file).unwrap();
        assert_eq!(data, read_data.as_slice());
        assert!(!test_file.with_extension("tmp").exists());
    }
}
