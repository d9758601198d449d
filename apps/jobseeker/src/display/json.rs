use serde_json::Value;

use crate::errors::ApiError;

/// Pretty printer for the parsed résumé blobs.
pub struct JsonView;

impl JsonView {
    /// Re-indents a JSON document with two spaces. Invalid input is an error.
    pub fn pretty(raw: &str) -> Result<String, ApiError> {
        let value: Value = serde_json::from_str(raw)?;
        Ok(Self::pretty_value(&value))
    }

    /// Pretty-prints a value. A string holding JSON is expanded first.
    pub fn pretty_value(value: &Value) -> String {
        if let Value::String(inner) = value {
            if let Ok(pretty) = Self::pretty(inner) {
                return pretty;
            }
        }
        serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
    }
}
