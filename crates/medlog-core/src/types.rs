//! Core types for entries and structured medicine records

use crate::error::ValidationError;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

/// One captured text fragment awaiting structuring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: i64,
    pub text: String,
    pub timestamp: String,
}

/// Presentation row for an entry; `seq` reflects insertion order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryRow {
    pub seq: usize,
    pub text: String,
    pub timestamp: String,
    pub id: i64,
}

fn default_confidence() -> f64 {
    1.0
}

/// Confidence assigned to records built from the heuristic fallback
pub const FALLBACK_CONFIDENCE: f64 = 0.0;

/// The field-decomposed form of one entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredRecord {
    pub id: i64,
    pub original_text: String,
    pub drug_name: String,
    #[serde(default)]
    pub brand_name: String,
    #[serde(default)]
    pub generic_name: String,
    #[serde(default)]
    pub quantity: f64,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub specification: String,
    #[serde(default)]
    pub package_count: String,
    #[serde(default)]
    pub expiry_date: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default = "default_confidence")]
    pub confidence: f64,
}

impl StructuredRecord {
    /// Build a record from extracted fields.
    ///
    /// Fails when the drug name is blank or the quantity is not finite.
    pub fn from_fields(
        original_text: &str,
        fields: FieldMap,
        id: i64,
        timestamp: String,
    ) -> Result<Self, ValidationError> {
        if !fields.quantity.is_finite() {
            return Err(ValidationError::InvalidQuantity(fields.quantity));
        }
        let confidence = if fields.fallback {
            FALLBACK_CONFIDENCE
        } else {
            default_confidence()
        };
        let record = Self {
            id,
            original_text: original_text.trim().to_string(),
            drug_name: fields.drug_name,
            brand_name: fields.brand_name,
            generic_name: fields.generic_name,
            quantity: fields.quantity,
            unit: fields.unit,
            specification: fields.specification,
            package_count: fields.package_count,
            expiry_date: fields.expiry_date,
            timestamp,
            confidence,
        };
        if !record.is_valid() {
            return Err(ValidationError::MissingDrugName);
        }
        Ok(record)
    }

    /// A record is valid when it names a drug
    pub fn is_valid(&self) -> bool {
        !self.drug_name.trim().is_empty()
    }
}

/// Presentation row for a record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordRow {
    pub seq: usize,
    #[serde(flatten)]
    pub record: StructuredRecord,
}

/// Quantity as the model writes it: a number, a numeric string, or `""` /
/// `null` for "not mentioned" (zero)
fn model_quantity<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    match Option::<serde_json::Value>::deserialize(deserializer)? {
        None => Ok(0.0),
        Some(serde_json::Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| de::Error::custom("quantity out of range")),
        Some(serde_json::Value::String(s)) if s.trim().is_empty() => Ok(0.0),
        Some(serde_json::Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|q| q.is_finite())
            .ok_or_else(|| de::Error::custom(format!("quantity is not a number: {:?}", s))),
        Some(other) => Err(de::Error::custom(format!(
            "quantity is not a number: {}",
            other
        ))),
    }
}

/// Fields extracted from one text by the model.
///
/// Decoding is strict: `drug_name` must be present, unknown keys and wrongly
/// typed values are rejected. Absent optional keys default to empty / zero,
/// and a blank quantity reads as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldMap {
    pub drug_name: String,
    #[serde(default)]
    pub brand_name: String,
    #[serde(default)]
    pub generic_name: String,
    #[serde(default, deserialize_with = "model_quantity")]
    pub quantity: f64,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub specification: String,
    #[serde(default)]
    pub package_count: String,
    #[serde(default)]
    pub expiry_date: String,
    /// Produced by the heuristic fallback rather than the model
    #[serde(skip)]
    pub fallback: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(name: &str) -> FieldMap {
        FieldMap {
            drug_name: name.to_string(),
            quantity: 2.0,
            unit: "盒".to_string(),
            expiry_date: "2027-06".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_from_fields() {
        let record =
            StructuredRecord::from_fields("  阿莫西林 两盒 ", fields("阿莫西林"), 7, "t".into())
                .unwrap();
        assert_eq!(record.id, 7);
        assert_eq!(record.original_text, "阿莫西林 两盒");
        assert_eq!(record.quantity, 2.0);
        assert_eq!(record.confidence, 1.0);
    }

    #[test]
    fn test_from_fields_rejects_blank_name() {
        let err = StructuredRecord::from_fields("x", fields("  "), 1, "t".into()).unwrap_err();
        assert_eq!(err, ValidationError::MissingDrugName);
    }

    #[test]
    fn test_from_fields_rejects_nan_quantity() {
        let mut f = fields("Aspirin");
        f.quantity = f64::NAN;
        assert!(matches!(
            StructuredRecord::from_fields("x", f, 1, "t".into()),
            Err(ValidationError::InvalidQuantity(_))
        ));
    }

    #[test]
    fn test_fallback_fields_are_low_confidence() {
        let mut f = fields("Aspirin");
        f.fallback = true;
        let record = StructuredRecord::from_fields("Aspirin, 1 box", f, 1, "t".into()).unwrap();
        assert_eq!(record.confidence, FALLBACK_CONFIDENCE);
    }

    #[test]
    fn test_record_backwards_compatible() {
        let old_json = r#"{"id":1,"original_text":"a","drug_name":"Aspirin"}"#;
        let parsed: StructuredRecord = serde_json::from_str(old_json).unwrap();
        assert_eq!(parsed.quantity, 0.0);
        assert_eq!(parsed.confidence, 1.0);
        assert!(parsed.expiry_date.is_empty());
    }

    #[test]
    fn test_field_map_strict_decode() {
        let ok: FieldMap = serde_json::from_str(r#"{"drug_name":"Aspirin","quantity":1}"#).unwrap();
        assert_eq!(ok.quantity, 1.0);
        assert!(!ok.fallback);

        assert!(serde_json::from_str::<FieldMap>(r#"{"brand_name":"x"}"#).is_err());
        assert!(serde_json::from_str::<FieldMap>(r#"{"drug_name":"a","quantity":"lots"}"#).is_err());
        assert!(serde_json::from_str::<FieldMap>(r#"{"drug_name":"a","quantity":"NaN"}"#).is_err());
        assert!(serde_json::from_str::<FieldMap>(r#"{"drug_name":"a","quantity":[1]}"#).is_err());
        assert!(serde_json::from_str::<FieldMap>(r#"{"drug_name":"a","dose":"1"}"#).is_err());
    }

    #[test]
    fn test_field_map_blank_quantity_is_zero() {
        for raw in [r#""""#, r#"" ""#, "null"] {
            let json = format!(r#"{{"drug_name":"阿莫西林","quantity":{},"expiry_date":"2027-06"}}"#, raw);
            let fields: FieldMap = serde_json::from_str(&json).unwrap();
            assert_eq!(fields.quantity, 0.0);
            assert_eq!(fields.expiry_date, "2027-06");
        }
        let numeric: FieldMap =
            serde_json::from_str(r#"{"drug_name":"a","quantity":" 30 "}"#).unwrap();
        assert_eq!(numeric.quantity, 30.0);
    }

    #[test]
    fn test_record_row_flattens() {
        let record =
            StructuredRecord::from_fields("Aspirin", fields("Aspirin"), 1, "t".into()).unwrap();
        let value = serde_json::to_value(RecordRow { seq: 3, record }).unwrap();
        assert_eq!(value["seq"], 3);
        assert_eq!(value["drug_name"], "Aspirin");
    }
}
