//! JSON output
//!
//! Compact output keeps field declaration order. Pretty output is indented and has its object
//! keys sorted so diffs between runs stay small. Array order is never touched.

use serde_json::Value;
use webtags_core::SpecResult;

pub fn render(specs: &[SpecResult], pretty: bool) -> serde_json::Result<String> {
    if pretty {
        let value = sort_keys(serde_json::to_value(specs)?);
        serde_json::to_string_pretty(&value)
    } else {
        serde_json::to_string(specs)
    }
}

fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, sort_keys(value)))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}
