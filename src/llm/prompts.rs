//! Prompt text for the filter request.

use crate::grid::{self, Record};
use serde_json::Value;

pub const MODEL: &str = "gpt-4-turbo";

/// Output budget for one completion.
pub const MAX_TOKENS: u32 = 150;

pub const SYSTEM_PROMPT: &str =
    "You are acting as a data assistant helping to filter and process grid data.";

/// Build the user turn: the full original dataset as compact JSON plus the
/// filter text, inserted as-is.
pub fn build_filter_prompt(records: &[Record], filter: &str) -> String {
    // Value's Display is its compact JSON text and cannot fail.
    let rows_json = Value::Array(grid::rows_from_records(records));
    format!(
        "Given the following rows of data in JSON {rows_json}, and a user wants to filter by {filter}. \
         Please provide a JSON array specifying the filtered rows."
    )
}
