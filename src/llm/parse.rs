//! Validate an extracted payload as a sequence of rows.

use serde_json::Value;

/// Parse `payload` as JSON and accept it only if it is an array.
///
/// Items are not inspected; any shape is a valid row at this stage.
pub fn parse_candidate(payload: &str) -> Result<Vec<Value>, ParseError> {
    let value: Value = serde_json::from_str(payload).map_err(|e| {
        log::warn!(
            "[LLM] Failed to parse candidate JSON: {} — raw: {}",
            e,
            excerpt(payload)
        );
        ParseError::InvalidJson(e)
    })?;

    match value {
        Value::Array(rows) => Ok(rows),
        other => {
            let found = json_kind(&other);
            log::warn!("[LLM] Invalid response format: expected array, found {}", found);
            Err(ParseError::NotAnArray { found })
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn excerpt(text: &str) -> &str {
    match text.char_indices().nth(200) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Error parsing JSON. Please try again.")]
    InvalidJson(#[source] serde_json::Error),

    #[error("Invalid response format. Please try again.")]
    NotAnArray { found: &'static str },
}
