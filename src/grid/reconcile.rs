//! Schema reconciliation — narrow the column list to the fields a
//! candidate dataset actually carries.

use super::ColumnDef;
use serde_json::Value;
use std::collections::HashSet;

/// A candidate dataset ready to replace the displayed one.
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciled {
    pub columns: Vec<ColumnDef>,
    pub rows: Vec<Value>,
}

/// Derive the new displayed schema and rows from `candidate`.
///
/// The first record's field names are authoritative. Columns keep the order
/// of `columns`; rows are taken as-is, including fields that no longer have
/// a column. A first item that is not an object yields an empty schema.
pub fn reconcile(candidate: &[Value], columns: &[ColumnDef]) -> Result<Reconciled, ApplyError> {
    let first = candidate.first().ok_or(ApplyError::NoVisualizationData)?;

    let fields: HashSet<&str> = match first {
        Value::Object(record) => record.keys().map(String::as_str).collect(),
        _ => HashSet::new(),
    };

    let columns: Vec<ColumnDef> = columns
        .iter()
        .filter(|col| fields.contains(col.field.as_str()))
        .cloned()
        .collect();

    log::info!(
        "[GRID] Reconciled {} rows against columns [{}]",
        candidate.len(),
        columns
            .iter()
            .map(|c| c.field.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );

    Ok(Reconciled {
        columns,
        rows: candidate.to_vec(),
    })
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ApplyError {
    #[error("No visualization data available.")]
    NoVisualizationData,
}
