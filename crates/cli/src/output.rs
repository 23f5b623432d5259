#![forbid(unsafe_code)]

use rusqlite::types::Value;
use sb_storage::{Query, Registry};

pub(crate) fn list_json(registry: &Registry) -> Result<String, serde_json::Error> {
    let queries = registry
        .names()
        .into_iter()
        .filter_map(|name| registry.get(name))
        .collect::<Vec<&Query>>();
    serde_json::to_string_pretty(&queries)
}

pub(crate) fn render_value(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Integer(v) => v.to_string(),
        Value::Real(v) => v.to_string(),
        Value::Text(v) => escape_cell(v),
        Value::Blob(v) => format!("<{} bytes>", v.len()),
    }
}

// Rows are printed tab-separated, one per line.
fn escape_cell(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(ch),
        }
    }
    out
}
