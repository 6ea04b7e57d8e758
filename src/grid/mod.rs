//! Tabular data domain — records, column schema, and cell rendering.
//!
//! The displayed dataset is held as raw JSON values because a completion
//! may hand back rows of any shape; only the seed dataset is guaranteed to
//! be a list of flat string records.

mod reconcile;
mod seed;
mod sort;

pub use reconcile::{reconcile, ApplyError, Reconciled};
pub use seed::{seed_columns, seed_records};
pub use sort::{sorted_order, SortDirection};

use serde::Serialize;
use serde_json::{Map, Value};

/// One row: field name → field value, in insertion order.
pub type Record = Map<String, Value>;

/// A grid column descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDef {
    pub field: String,
    pub header_name: String,
    pub sortable: bool,
    pub filter: bool,
}

impl ColumnDef {
    /// A sortable, filterable column.
    pub fn new(field: &str, header_name: &str) -> Self {
        Self {
            field: field.to_string(),
            header_name: header_name.to_string(),
            sortable: true,
            filter: true,
        }
    }
}

/// Wrap records as displayable rows.
pub fn rows_from_records(records: &[Record]) -> Vec<Value> {
    records.iter().cloned().map(Value::Object).collect()
}

/// Text shown in the cell at `field` of `row`.
///
/// Non-object rows and missing fields render empty.
pub fn cell_text(row: &Value, field: &str) -> String {
    value_text(row.as_object().and_then(|record| record.get(field)))
}

pub(crate) fn value_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
