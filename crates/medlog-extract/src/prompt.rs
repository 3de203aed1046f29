//! Prompt templates and reply decoding

use crate::error::BatchRejection;
use medlog_core::FieldMap;

const FIELD_INSTRUCTIONS: &str = "\
1. drug_name - common drug name, required
2. brand_name - trade name, only if the text mentions one
3. generic_name - scientific / chemical name, inferred from the drug name when known (阿莫西林 -> Amoxicillin)
4. quantity - a number (\"一盒\" -> 1, \"30片\" -> 30), 0 when not mentioned
5. unit - e.g. \"盒\", \"片\", \"袋\"
6. specification - e.g. \"0.5g\", \"500mg\"
7. package_count - e.g. \"1盒\", \"2板\"
8. expiry_date - formatted as YYYY-MM or YYYY-MM-DD (\"2027年6月\" -> \"2027-06\")";

const EXAMPLE_OBJECT: &str = r#"{
  "drug_name": "阿莫西林",
  "brand_name": "",
  "generic_name": "Amoxicillin",
  "quantity": 1.0,
  "unit": "盒",
  "specification": "",
  "package_count": "1盒",
  "expiry_date": "2027-06"
}"#;

pub fn build_prompt(text: &str) -> String {
    format!(
        "Extract structured data from this medicine package description.\n\n\
         Text: \"{}\"\n\n\
         Return a JSON object with these keys:\n{}\n\n\
         Rules:\n\
         - Use an empty string \"\" for any other field the text does not mention\n\
         - Normalise quantities and dates where possible\n\
         - Return only the JSON, no explanation\n\n\
         Example:\n{}",
        text, FIELD_INSTRUCTIONS, EXAMPLE_OBJECT
    )
}

pub fn build_batch_prompt(texts: &[String]) -> String {
    let numbered: Vec<String> = texts
        .iter()
        .enumerate()
        .map(|(i, t)| format!("{}. \"{}\"", i + 1, t))
        .collect();
    format!(
        "Extract structured data from each of these medicine package descriptions.\n\n\
         Texts:\n{}\n\n\
         For every text return an object with these keys:\n{}\n\n\
         Rules:\n\
         - Return a JSON array with exactly {} objects\n\
         - Keep the array in the same order as the texts\n\
         - Use an empty string \"\" for any other field a text does not mention\n\
         - Return only the JSON array, no explanation\n\n\
         Example:\n[\n{},\n  ...\n]",
        numbered.join("\n"),
        FIELD_INSTRUCTIONS,
        texts.len(),
        EXAMPLE_OBJECT
    )
}

/// Strip surrounding whitespace and one enclosing markdown code fence
pub fn strip_code_fence(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(body) = trimmed
        .strip_prefix("```")
        .and_then(|rest| rest.strip_suffix("```"))
    else {
        return trimmed;
    };
    match body.split_once('\n') {
        Some((tag, inner)) if !tag.trim_start().starts_with(['{', '[']) => inner.trim(),
        _ => body.trim(),
    }
}

/// Decode a single-text reply
pub fn decode_single(reply: &str) -> Result<FieldMap, serde_json::Error> {
    serde_json::from_str(strip_code_fence(reply))
}

/// Decode a batch reply; all or nothing
pub fn decode_batch(reply: &str, expected: usize) -> Result<Vec<FieldMap>, BatchRejection> {
    let value: serde_json::Value =
        serde_json::from_str(strip_code_fence(reply)).map_err(BatchRejection::Syntax)?;
    let serde_json::Value::Array(items) = value else {
        return Err(BatchRejection::NotArray);
    };
    if items.len() != expected {
        return Err(BatchRejection::LengthMismatch {
            expected,
            got: items.len(),
        });
    }
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(item).map_err(|source| BatchRejection::Element { index, source })
        })
        .collect()
}
