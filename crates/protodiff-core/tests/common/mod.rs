//! Shared fixtures for integration tests.
//!
//! Snapshots are written in the protobuf JSON mapping of a descriptor set and
//! parsed through `SchemaSnapshot::from_json`, so every fixture also exercises
//! the JSON input path.

use protodiff_core::model::SchemaSnapshot;
use serde_json::{json, Value};

/// Parse a descriptor-set JSON value into a snapshot
#[allow(dead_code)]
pub fn snapshot(value: Value) -> SchemaSnapshot {
    let bytes = serde_json::to_vec(&value).unwrap();
    SchemaSnapshot::from_json(&bytes).unwrap()
}

/// A single `helloworld.proto` file with the given top-level declarations
#[allow(dead_code)]
pub fn helloworld(messages: Value, enums: Value, services: Value) -> SchemaSnapshot {
    snapshot(json!({
        "file": [{
            "name": "helloworld.proto",
            "package": "helloworld",
            "messageType": messages,
            "enumType": enums,
            "service": services
        }]
    }))
}

/// Shorthand for a singular string field
#[allow(dead_code)]
pub fn string_field(name: &str, number: i32) -> Value {
    json!({
        "name": name,
        "number": number,
        "label": "LABEL_OPTIONAL",
        "type": "TYPE_STRING"
    })
}

/// Render a report's changes as their display lines
#[allow(dead_code)]
pub fn lines(report: &protodiff_core::Report) -> Vec<String> {
    report.iter().map(|c| c.to_string()).collect()
}
