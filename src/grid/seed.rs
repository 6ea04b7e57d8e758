//! Static seed data the grid starts with.

use super::{ColumnDef, Record};
use serde_json::Value;

/// (name, language, country, game)
const SEED_ROWS: &[(&str, &str, &str, &str)] = &[
    ("John", "English", "USA", "Chess"),
    ("Maria", "Spanish", "Spain", "Football"),
    ("Pierre", "French", "France", "Tennis"),
    ("Hans", "German", "Germany", "Soccer"),
    ("Giuseppe", "Italian", "Italy", "Basketball"),
    ("Takeshi", "Japanese", "Japan", "Baseball"),
    ("Li", "Chinese", "China", "Golf"),
    ("Ivan", "Russian", "Russia", "Hockey"),
    ("Miguel", "Portuguese", "Portugal", "Rugby"),
    ("Ahmed", "Arabic", "Egypt", "Cricket"),
    ("punit", "English", "USA", "Chess"),
];

/// The original dataset, in display order.
pub fn seed_records() -> Vec<Record> {
    SEED_ROWS
        .iter()
        .map(|(name, language, country, game)| {
            let mut record = Record::new();
            record.insert("name".to_string(), Value::from(*name));
            record.insert("language".to_string(), Value::from(*language));
            record.insert("country".to_string(), Value::from(*country));
            record.insert("game".to_string(), Value::from(*game));
            record
        })
        .collect()
}

/// The original column schema.
pub fn seed_columns() -> Vec<ColumnDef> {
    vec![
        ColumnDef::new("name", "Name"),
        ColumnDef::new("language", "Language"),
        ColumnDef::new("country", "Country"),
        ColumnDef::new("game", "Game"),
    ]
}
