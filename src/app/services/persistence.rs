//! JSON encoding of the document, shared by auto-save, export and import.

use serde::Deserialize;
use serde_json::Value;

use crate::app::domain::resume::ResumeData;
use crate::app::infrastructure::error::{DeserializeError, Result};

/// Namespace key of the locally persisted document.
pub const STORAGE_KEY: &str = "resume-data-v1";

/// File name offered for JSON exports.
pub const EXPORT_FILE_NAME: &str = "resume.json";

/// Pretty-printed UTF-8 JSON of the whole document.
pub fn serialize(data: &ResumeData) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(data)?)
}

/// Parse a document, merging it over the default document at the root.
///
/// Top-level keys that are absent keep their default value; present ones
/// replace the default branch entirely (no field-by-field merge below the
/// root). Unknown keys are ignored.
pub fn deserialize(bytes: &[u8]) -> std::result::Result<ResumeData, DeserializeError> {
    let value: Value = serde_json::from_slice(bytes).map_err(DeserializeError::Syntax)?;
    if !value.is_object() {
        return Err(DeserializeError::NotAnObject(json_kind(&value)));
    }
    ResumeData::deserialize(value).map_err(DeserializeError::Shape)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
