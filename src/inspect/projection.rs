//! Field projection over the request descriptor.
//!
//! # Responsibilities
//! - Map each field key to an accessor over the descriptor
//! - Filter the fixed field set down to an endpoint's declared subset
//! - Serialize the selection as indented JSON with a trailing newline
//!
//! # Design Decisions
//! - A static `{key -> getter}` table instead of reflection; the table is
//!   the single source of truth for the closed field set
//! - Unknown requested keys are silently ignored
//! - serde_json's map keeps keys sorted, so repeated projections of the
//!   same descriptor are byte-identical

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use super::descriptor::RequestDescriptor;

type Getter = fn(&RequestDescriptor) -> Value;

/// The closed set of projectable fields. The projector never emits a key
/// outside this table.
pub const FIELD_TABLE: &[(&str, Getter)] = &[
    ("args", |d| map_value(&d.args)),
    ("data", |d| Value::String(d.data.clone())),
    ("files", |d| map_value(&d.files)),
    ("form", |d| map_value(&d.form)),
    ("headers", |d| map_value(&d.headers)),
    ("json", |d| Value::String(d.json.clone())),
    ("method", |d| Value::String(d.method.clone())),
    ("origin", |d| Value::String(d.origin.clone())),
    ("url", |d| Value::String(d.url.clone())),
    ("user-agent", |d| Value::String(d.user_agent.clone())),
];

fn map_value(map: &BTreeMap<String, String>) -> Value {
    Value::Object(
        map.iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect(),
    )
}

/// Project the descriptor down to exactly the requested keys.
pub fn project(descriptor: &RequestDescriptor, keys: &[&str]) -> Map<String, Value> {
    let mut projected = Map::new();
    for (name, getter) in FIELD_TABLE {
        if keys.contains(name) {
            projected.insert((*name).to_string(), getter(descriptor));
        }
    }
    projected
}

/// Serialize a projection: 2-space indentation, trailing newline.
pub fn to_pretty_json(projected: &Map<String, Value>) -> Result<String, serde_json::Error> {
    let mut body = serde_json::to_string_pretty(projected)?;
    body.push('\n');
    Ok(body)
}
