//! Flat text and CSV renderings for export

use crate::types::{Entry, RecordRow};
use chrono::Local;

/// Column header of the structured CSV export
pub const CSV_HEADER: [&str; 11] = [
    "#",
    "drug_name",
    "brand_name",
    "generic_name",
    "quantity",
    "unit",
    "specification",
    "package_count",
    "expiry_date",
    "original_text",
    "timestamp",
];

/// Lets spreadsheet tools detect UTF-8
const UTF8_BOM: &str = "\u{feff}";

/// Timestamp suffix used in export filenames
pub fn export_stamp() -> String {
    Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// One `"{n}. {text}"` line per entry, numbered from 1 in chronological order
pub fn render_text(entries: &[Entry]) -> String {
    entries
        .iter()
        .enumerate()
        .map(|(i, e)| format!("{}. {}\n", i + 1, e.text))
        .collect()
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// CSV document (with BOM) for the given rows, in the order given
pub fn render_csv(rows: &[RecordRow]) -> String {
    let mut out = String::from(UTF8_BOM);
    out.push_str(&CSV_HEADER.join(","));
    out.push('\n');
    for row in rows {
        let r = &row.record;
        let cells = [
            row.seq.to_string(),
            r.drug_name.clone(),
            r.brand_name.clone(),
            r.generic_name.clone(),
            r.quantity.to_string(),
            r.unit.clone(),
            r.specification.clone(),
            r.package_count.clone(),
            r.expiry_date.clone(),
            r.original_text.clone(),
            r.timestamp.clone(),
        ];
        let line: Vec<String> = cells.iter().map(|c| csv_field(c)).collect();
        out.push_str(&line.join(","));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StructuredRecord;

    #[test]
    fn test_render_text_numbers_from_one() {
        let entries = vec![
            Entry {
                id: 1,
                text: "阿莫西林 一盒".into(),
                timestamp: "t".into(),
            },
            Entry {
                id: 2,
                text: "布洛芬".into(),
                timestamp: "t".into(),
            },
        ];
        assert_eq!(render_text(&entries), "1. 阿莫西林 一盒\n2. 布洛芬\n");
    }

    #[test]
    fn test_render_csv_header_and_escaping() {
        let record = StructuredRecord {
            id: 1,
            original_text: "Aspirin, \"extra\" strength".into(),
            drug_name: "Aspirin".into(),
            brand_name: String::new(),
            generic_name: String::new(),
            quantity: 2.5,
            unit: "box".into(),
            specification: String::new(),
            package_count: String::new(),
            expiry_date: "2026-01".into(),
            timestamp: "2025-01-01 00:00:00".into(),
            confidence: 1.0,
        };
        let csv = render_csv(&[RecordRow { seq: 1, record }]);
        let mut lines = csv.lines();

        let header = lines.next().unwrap();
        assert!(header.starts_with('\u{feff}'));
        assert_eq!(header.trim_start_matches('\u{feff}').split(',').count(), 11);

        assert_eq!(
            lines.next().unwrap(),
            "1,Aspirin,,,2.5,box,,,2026-01,\"Aspirin, \"\"extra\"\" strength\",2025-01-01 00:00:00"
        );
        assert!(lines.next().is_none());
    }
}
