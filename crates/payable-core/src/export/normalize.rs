//! Datapoint value normalization.

use chrono::{NaiveDate, NaiveTime};
use serde_json::Value;

use crate::error::ExtractionError;
use crate::models::annotation::{DatapointNode, FieldType};

/// Input format of date-typed datapoints.
pub const SOURCE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Output format of normalized dates (midnight timestamp).
pub const TARGET_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Convert a datapoint into its canonical string form.
///
/// Absent or falsy values normalize to an empty string. Dates must be
/// `YYYY-MM-DD`; anything else is an error.
pub fn normalize(datapoint: &DatapointNode) -> Result<String, ExtractionError> {
    let Some(value) = datapoint.value.as_ref().filter(|v| !is_falsy(v)) else {
        return Ok(String::new());
    };

    let text = value_text(value);
    match datapoint.field_type {
        FieldType::Date => normalize_date(&datapoint.schema_id, &text),
        FieldType::Enum => Ok(text.to_uppercase()),
        _ => Ok(text),
    }
}

fn normalize_date(field: &str, text: &str) -> Result<String, ExtractionError> {
    let date = NaiveDate::parse_from_str(text, SOURCE_DATE_FORMAT).map_err(|_| {
        ExtractionError::InvalidDate {
            field: field.to_string(),
            value: text.to_string(),
        }
    })?;

    Ok(date.and_time(NaiveTime::MIN).format(TARGET_DATE_FORMAT).to_string())
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}
