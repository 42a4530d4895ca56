//! QIDO-RS answer to C-FIND answer.

use crate::error::TranslationError;
use crate::models::FlatTagRecord;
use orthanc_api::DicomJsonRecord;
use serde_json::Value;

/// Convert a DICOM JSON record to the tags expected by the DICOM protocol,
/// i.e. from
///
/// ```json
/// { "00080020": { "Value": [ "20130812" ], "vr": "DA" } }
/// ```
///
/// to
///
/// ```json
/// { "00080020": "20130812" }
/// ```
///
/// Tags without a value are omitted. Only the first value of multi-valued
/// tags is kept. Person names are represented by their `Alphabetic` component.
pub fn flatten(record: &DicomJsonRecord) -> Result<FlatTagRecord, TranslationError> {
    let mut flat = FlatTagRecord::new();
    for (tag, element) in record {
        let value = match element.as_ref().and_then(|e| e.value.first()) {
            Some(value) => value,
            None => continue,
        };
        let value = match value {
            Value::Null => continue,
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Object(map) => match map.get("Alphabetic") {
                Some(Value::String(name)) => name.clone(),
                _ => return Err(unsupported(tag, value)),
            },
            Value::Array(_) => return Err(unsupported(tag, value)),
        };
        flat.insert(tag.clone(), value);
    }
    Ok(flat)
}

fn unsupported(tag: &compact_str::CompactString, value: &Value) -> TranslationError {
    TranslationError {
        tag: tag.clone(),
        value: value.clone(),
    }
}
