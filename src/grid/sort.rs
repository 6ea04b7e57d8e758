//! View-side row ordering. Sorting never reorders the dataset itself;
//! it produces an index permutation for rendering.

use super::value_text;
use serde_json::Value;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

/// Row indices of `rows` ordered by the value at `field`.
///
/// Empty cells come first, then numbers by value, then text.
/// The sort is stable, so equal cells keep dataset order in both directions.
pub fn sorted_order(rows: &[Value], field: &str, direction: SortDirection) -> Vec<usize> {
    let mut order: Vec<usize> = (0..rows.len()).collect();
    order.sort_by(|&a, &b| {
        let ord = compare_cells(field_of(&rows[a], field), field_of(&rows[b], field));
        match direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
    order
}

fn field_of<'a>(row: &'a Value, field: &str) -> Option<&'a Value> {
    row.as_object().and_then(|record| record.get(field))
}

/// Total order over cells: missing/null first, then numbers by value,
/// then everything else by cell text.
fn compare_cells(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (cell_key(a), cell_key(b)) {
        (CellKey::Empty, CellKey::Empty) => Ordering::Equal,
        (CellKey::Number(x), CellKey::Number(y)) => x.total_cmp(&y),
        (CellKey::Text(x), CellKey::Text(y)) => x.cmp(&y),
        (x, y) => x.rank().cmp(&y.rank()),
    }
}

enum CellKey {
    Empty,
    Number(f64),
    Text(String),
}

impl CellKey {
    fn rank(&self) -> u8 {
        match self {
            CellKey::Empty => 0,
            CellKey::Number(_) => 1,
            CellKey::Text(_) => 2,
        }
    }
}

fn cell_key(value: Option<&Value>) -> CellKey {
    match value {
        None | Some(Value::Null) => CellKey::Empty,
        Some(Value::Number(n)) => n
            .as_f64()
            .map_or_else(|| CellKey::Text(n.to_string()), CellKey::Number),
        other => CellKey::Text(value_text(other)),
    }
}
