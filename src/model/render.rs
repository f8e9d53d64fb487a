//! Attribute-mapping representation used by the record's display form.
//!
//! Entries appear as `id`, `created_at`, `updated_at`, then extras by key.
//! Keys and string values are JSON-quoted, timestamps render as
//! `DateTime(<iso>)`, other extras as compact JSON.

use serde_json::Value;

use super::{timestamp, BaseModel};

pub fn attribute_repr(model: &BaseModel) -> String {
    let mut entries: Vec<String> = Vec::with_capacity(3 + model.extra.len());

    if let Some(id) = &model.id {
        entries.push(entry("id", &Value::String(id.clone()).to_string()));
    }
    if let Some(ts) = &model.created_at {
        entries.push(entry("created_at", &datetime_repr(ts)));
    }
    if let Some(ts) = &model.updated_at {
        entries.push(entry("updated_at", &datetime_repr(ts)));
    }
    for (key, value) in &model.extra {
        entries.push(entry(key, &value.to_string()));
    }

    format!("{{{}}}", entries.join(", "))
}

fn entry(key: &str, value: &str) -> String {
    format!("{}: {}", Value::String(key.to_string()), value)
}

fn datetime_repr(ts: &chrono::DateTime<chrono::Utc>) -> String {
    format!("DateTime({})", timestamp::format(ts))
}
