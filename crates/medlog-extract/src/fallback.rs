use medlog_core::FieldMap;
use tracing::warn;

/// Heuristic field map used when the model cannot be reached or understood.
///
/// The drug name is the text up to the first ASCII or full-width comma.
pub fn fallback_fields(text: &str) -> FieldMap {
    warn!(text = %text, "using fallback extraction");
    let head = text.split([',', '，']).next().unwrap_or_default();
    FieldMap {
        drug_name: head.trim().to_string(),
        fallback: true,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_splits_on_first_comma() {
        assert_eq!(fallback_fields("阿莫西林，一盒，2027年").drug_name, "阿莫西林");
        assert_eq!(fallback_fields(" Aspirin , 2 boxes").drug_name, "Aspirin");
        assert_eq!(fallback_fields("a,b，c").drug_name, "a");
        assert_eq!(fallback_fields("a，b,c").drug_name, "a");
        assert_eq!(fallback_fields("布洛芬缓释胶囊").drug_name, "布洛芬缓释胶囊");
    }

    #[test]
    fn test_fallback_other_fields_empty() {
        let fields = fallback_fields("Aspirin, 2 boxes, 2026-01");
        assert!(fields.fallback);
        assert_eq!(fields.quantity, 0.0);
        assert!(fields.brand_name.is_empty());
        assert!(fields.expiry_date.is_empty());
    }
}
