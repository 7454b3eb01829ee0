//! End-to-end diff scenarios over full snapshots.
//!
//! Each test builds a previous and a current snapshot, runs the diff and
//! asserts on the exact rendered change lines.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{helloworld, lines, snapshot, string_field};
use protodiff_core::diff::{diff, ChangeCategory, TypeSide};
use protodiff_core::errors::ExErrorKind;
use protodiff_core::model::FieldType;
use protodiff_core::{Change, SchemaError, SchemaSnapshot};
use serde_json::json;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

fn foo_enum(values: serde_json::Value) -> SchemaSnapshot {
    helloworld(json!([]), json!([{"name": "FOO", "value": values}]), json!([]))
}

#[test]
fn test_enum_value_renumbered() {
    let previous = foo_enum(json!([{"name": "zero", "number": 0}, {"name": "bat", "number": 1}]));
    let current = foo_enum(json!([{"name": "zero", "number": 0}, {"name": "bat", "number": 2}]));

    let report = diff(&previous, &current);
    assert_eq!(lines(&report), vec!["changed value 'bat' on enum 'FOO': 1 -> 2"]);
}

#[test]
fn test_enum_value_renamed() {
    let previous = foo_enum(json!([{"name": "zero", "number": 0}, {"name": "foo", "number": 1}]));
    let current = foo_enum(json!([{"name": "zero", "number": 0}, {"name": "bat", "number": 1}]));

    assert_eq!(
        lines(&diff(&previous, &current)),
        vec!["changed name of field #1 on enum 'FOO': foo -> bat"]
    );
}

#[test]
fn test_removed_enum() {
    let previous = foo_enum(json!([{"name": "zero", "number": 0}]));
    let current = helloworld(json!([]), json!([]), json!([]));

    assert_eq!(lines(&diff(&previous, &current)), vec!["removed enum 'FOO'"]);
}

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

fn hello_request(fields: serde_json::Value) -> SchemaSnapshot {
    helloworld(
        json!([{"name": "HelloRequest", "field": fields}]),
        json!([]),
        json!([]),
    )
}

#[test]
fn test_field_label_changed() {
    let previous = hello_request(json!([string_field("name", 1)]));
    let current = hello_request(json!([{
        "name": "name",
        "number": 1,
        "label": "LABEL_REPEATED",
        "type": "TYPE_STRING"
    }]));

    assert_eq!(
        lines(&diff(&previous, &current)),
        vec!["changed label for field 'name' on message 'HelloRequest': LABEL_OPTIONAL -> LABEL_REPEATED"]
    );
}

#[test]
fn test_field_renamed() {
    let previous = hello_request(json!([string_field("foo", 1)]));
    let current = hello_request(json!([string_field("bar", 1)]));

    assert_eq!(
        lines(&diff(&previous, &current)),
        vec!["changed name for field #1 on message 'HelloRequest': foo -> bar"]
    );
}

#[test]
fn test_field_type_changed() {
    let previous = hello_request(json!([string_field("name", 1)]));
    let current = hello_request(json!([{
        "name": "name",
        "number": 1,
        "label": "LABEL_OPTIONAL",
        "type": "TYPE_BYTES"
    }]));

    let report = diff(&previous, &current);
    assert_eq!(
        report.changes(),
        &[Change::ChangedFieldType {
            message: "HelloRequest".to_string(),
            field: "name".to_string(),
            old_type: FieldType::String,
            new_type: FieldType::Bytes,
        }]
    );
    assert_eq!(
        report.changes()[0].to_string(),
        "changed types for field 'name' on message 'HelloRequest': TYPE_STRING -> TYPE_BYTES"
    );
}

#[test]
fn test_field_reference_type_changed() {
    let message_field = |type_name: &str| {
        json!({
            "name": "payload",
            "number": 2,
            "label": "LABEL_OPTIONAL",
            "type": "TYPE_MESSAGE",
            "typeName": type_name
        })
    };
    let previous = hello_request(json!([message_field(".helloworld.Foo")]));
    let current = hello_request(json!([message_field(".helloworld.Bar")]));

    assert_eq!(
        lines(&diff(&previous, &current)),
        vec!["changed types for field 'payload' on message 'HelloRequest': .helloworld.Foo -> .helloworld.Bar"]
    );
}

#[test]
fn test_removed_field_not_reserved() {
    let previous = hello_request(json!([string_field("name", 1), string_field("extra", 2)]));
    let current = hello_request(json!([string_field("name", 1)]));

    assert_eq!(
        lines(&diff(&previous, &current)),
        vec!["removed field 'extra' from message 'HelloRequest'"]
    );
}

#[test]
fn test_removed_field_fully_reserved_is_compatible() {
    let previous = hello_request(json!([string_field("name", 1), string_field("extra", 2)]));
    let current = helloworld(
        json!([{
            "name": "HelloRequest",
            "field": [string_field("name", 1)],
            "reservedName": ["extra"],
            "reservedRange": [{"start": 2, "end": 3}]
        }]),
        json!([]),
        json!([]),
    );

    let report = diff(&previous, &current);
    assert!(report.is_compatible(), "unexpected: {}", report);
}

#[test]
fn test_removed_field_with_only_name_reserved_is_reported() {
    let previous = hello_request(json!([string_field("name", 1), string_field("extra", 2)]));
    let current = helloworld(
        json!([{
            "name": "HelloRequest",
            "field": [string_field("name", 1)],
            "reservedName": ["extra"]
        }]),
        json!([]),
        json!([]),
    );

    assert_eq!(
        lines(&diff(&previous, &current)),
        vec!["removed field 'extra' from message 'HelloRequest'"]
    );
}

#[test]
fn test_removed_field_with_only_number_reserved_is_reported() {
    let previous = hello_request(json!([string_field("name", 1), string_field("extra", 2)]));
    let current = helloworld(
        json!([{
            "name": "HelloRequest",
            "field": [string_field("name", 1)],
            "reservedRange": [{"start": 2, "end": 3}]
        }]),
        json!([]),
        json!([]),
    );

    assert_eq!(
        lines(&diff(&previous, &current)),
        vec!["removed field 'extra' from message 'HelloRequest'"]
    );
}

#[test]
fn test_removed_message() {
    let previous = hello_request(json!([string_field("name", 1)]));
    let current = helloworld(json!([]), json!([]), json!([]));

    assert_eq!(
        lines(&diff(&previous, &current)),
        vec!["removed message 'HelloRequest'"]
    );
}

// ---------------------------------------------------------------------------
// Reservations
// ---------------------------------------------------------------------------

fn reserved(names: serde_json::Value, ranges: serde_json::Value) -> SchemaSnapshot {
    helloworld(
        json!([{
            "name": "HelloRequest",
            "reservedName": names,
            "reservedRange": ranges
        }]),
        json!([]),
        json!([]),
    )
}

#[test]
fn test_reserved_range_not_covered() {
    let previous = reserved(json!([]), json!([{"start": 1, "end": 4}]));
    let current = reserved(json!([]), json!([]));

    assert_eq!(
        lines(&diff(&previous, &current)),
        vec!["un-reserved field number(s) in range 1 to 3 from message 'HelloRequest'"]
    );
}

#[test]
fn test_reserved_range_split_in_two_is_still_flagged() {
    let previous = reserved(json!([]), json!([{"start": 1, "end": 4}]));
    let current = reserved(
        json!([]),
        json!([{"start": 1, "end": 2}, {"start": 2, "end": 4}]),
    );

    let report = diff(&previous, &current);
    assert_eq!(report.len(), 1);
    assert_eq!(report.changes()[0].category(), ChangeCategory::Reservation);
}

#[test]
fn test_reserved_range_widened_is_compatible() {
    let previous = reserved(json!([]), json!([{"start": 2, "end": 4}]));
    let current = reserved(json!([]), json!([{"start": 1, "end": 10}]));

    assert!(diff(&previous, &current).is_empty());
}

#[test]
fn test_single_number_range_uses_singular_wording() {
    let previous = reserved(json!([]), json!([{"start": 7, "end": 8}]));
    let current = reserved(json!([]), json!([]));

    assert_eq!(
        lines(&diff(&previous, &current)),
        vec!["un-reserved field number 7 from message 'HelloRequest'"]
    );
}

#[test]
fn test_reserved_name_dropped() {
    let previous = reserved(json!(["old", "older"]), json!([]));
    let current = reserved(json!(["older"]), json!([]));

    assert_eq!(
        lines(&diff(&previous, &current)),
        vec!["un-reserved field name 'old' from message 'HelloRequest'"]
    );
}

// ---------------------------------------------------------------------------
// Services
// ---------------------------------------------------------------------------

fn foo_service(methods: serde_json::Value) -> SchemaSnapshot {
    helloworld(json!([]), json!([]), json!([{"name": "Foo", "method": methods}]))
}

#[test]
fn test_method_input_type_changed() {
    let previous = foo_service(json!([{
        "name": "Invoke",
        "inputType": ".helloworld.FooRequest",
        "outputType": ".helloworld.FooResponse"
    }]));
    let current = foo_service(json!([{
        "name": "Invoke",
        "inputType": ".helloworld.BarRequest",
        "outputType": ".helloworld.FooResponse"
    }]));

    let report = diff(&previous, &current);
    assert_eq!(report.len(), 1);
    match &report.changes()[0] {
        Change::ChangedMethodType {
            service,
            method,
            side,
            old_type,
            new_type,
        } => {
            assert_eq!(service, "Foo");
            assert_eq!(method, "Invoke");
            assert_eq!(*side, TypeSide::Input);
            assert_eq!(old_type, ".helloworld.FooRequest");
            assert_eq!(new_type, ".helloworld.BarRequest");
        }
        other => panic!("unexpected change: {:?}", other),
    }
}

#[test]
fn test_method_streaming_changed() {
    let previous = foo_service(json!([{
        "name": "Watch",
        "inputType": ".helloworld.Req",
        "outputType": ".helloworld.Resp"
    }]));
    let current = foo_service(json!([{
        "name": "Watch",
        "inputType": ".helloworld.Req",
        "outputType": ".helloworld.Resp",
        "serverStreaming": true
    }]));

    assert_eq!(
        lines(&diff(&previous, &current)),
        vec!["changed server streaming for method 'Watch' on service 'Foo': false -> true"]
    );
}

#[test]
fn test_removed_service_and_method() {
    let previous = helloworld(
        json!([]),
        json!([]),
        json!([
            {"name": "Foo", "method": [
                {"name": "A", "inputType": ".p.X", "outputType": ".p.Y"},
                {"name": "B", "inputType": ".p.X", "outputType": ".p.Y"}
            ]},
            {"name": "Bar"}
        ]),
    );
    let current = foo_service(json!([
        {"name": "A", "inputType": ".p.X", "outputType": ".p.Y"}
    ]));

    assert_eq!(
        lines(&diff(&previous, &current)),
        vec!["removed method 'B' from service 'Foo'", "removed service 'Bar'"]
    );
}

// ---------------------------------------------------------------------------
// Packages and aggregation
// ---------------------------------------------------------------------------

#[test]
fn test_removed_package_across_files() {
    let previous = snapshot(json!({
        "file": [
            {"name": "a.proto", "package": "alpha", "messageType": [{"name": "A"}]},
            {"name": "b.proto", "package": "beta", "messageType": [{"name": "B"}]}
        ]
    }));
    let current = snapshot(json!({
        "file": [{"name": "a.proto", "package": "alpha", "messageType": [{"name": "A"}]}]
    }));

    assert_eq!(lines(&diff(&previous, &current)), vec!["removed package 'beta'"]);
}

#[test]
fn test_declaration_moved_between_files_of_one_package_is_compatible() {
    let previous = snapshot(json!({
        "file": [
            {"name": "a.proto", "package": "p", "messageType": [{"name": "A"}, {"name": "B"}]}
        ]
    }));
    let current = snapshot(json!({
        "file": [
            {"name": "a.proto", "package": "p", "messageType": [{"name": "A"}]},
            {"name": "b.proto", "package": "p", "messageType": [{"name": "B"}]}
        ]
    }));

    assert!(diff(&previous, &current).is_compatible());
}

#[test]
fn test_default_package_is_compared() {
    let previous = snapshot(json!({"file": [{"name": "x.proto", "messageType": [{"name": "X"}]}]}));
    let current = snapshot(json!({"file": [{"name": "x.proto"}]}));

    assert_eq!(lines(&diff(&previous, &current)), vec!["removed message 'X'"]);
}

#[test]
fn test_check_aggregates_every_problem() {
    let previous = helloworld(
        json!([{"name": "HelloRequest", "field": [string_field("name", 1)]}]),
        json!([{"name": "FOO", "value": [{"name": "zero", "number": 0}]}]),
        json!([]),
    );
    let current = helloworld(json!([]), json!([]), json!([]));

    let report = diff(&previous, &current);
    let err = report.check().unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::BreakingChanges);
    assert_eq!(err.code(), "ERR_BREAKING_CHANGES");
    assert_eq!(err.problem_count(), Some(2));
    assert_eq!(
        err.message(),
        "found 2 problems: [removed enum 'FOO' removed message 'HelloRequest']"
    );
}

#[test]
fn test_identical_snapshots_pass_check() {
    let snapshot = hello_request(json!([string_field("name", 1)]));
    let report = diff(&snapshot, &snapshot);
    assert!(report.check().is_ok());
}

#[test]
fn test_report_serializes_with_kind_tag() {
    let previous = foo_enum(json!([{"name": "bat", "number": 1}]));
    let current = foo_enum(json!([{"name": "bat", "number": 2}]));

    let value = serde_json::to_value(diff(&previous, &current)).unwrap();
    assert_eq!(
        value["changes"][0],
        json!({
            "kind": "changed_enum_value",
            "enum": "FOO",
            "value": "bat",
            "old_number": 1,
            "new_number": 2
        })
    );
}

// ---------------------------------------------------------------------------
// JSON input validation
// ---------------------------------------------------------------------------

#[test]
fn test_json_missing_field_number_names_the_declaration() {
    let bytes = serde_json::to_vec(&json!({
        "file": [{
            "name": "helloworld.proto",
            "package": "helloworld",
            "messageType": [{"name": "HelloRequest", "field": [
                string_field("name", 1),
                {"name": "extra", "label": "LABEL_OPTIONAL", "type": "TYPE_STRING"}
            ]}]
        }]
    }))
    .unwrap();

    let err = SchemaSnapshot::from_json(&bytes).unwrap_err();
    assert_eq!(
        err,
        SchemaError::MissingField {
            path: "helloworld.HelloRequest.field[1]".to_string(),
            attribute: "number".to_string(),
        }
    );

    let ex: protodiff_core::ExError = err.into();
    assert_eq!(ex.kind(), ExErrorKind::MissingField);
    assert_eq!(ex.entity_id(), Some("helloworld.HelloRequest.field[1]"));
}

#[test]
fn test_json_missing_method_input_type_names_the_declaration() {
    let bytes = serde_json::to_vec(&json!({
        "file": [{"package": "helloworld", "service": [{"name": "Foo", "method": [
            {"name": "Invoke", "outputType": ".helloworld.Resp"}
        ]}]}]
    }))
    .unwrap();

    let ex: protodiff_core::ExError = SchemaSnapshot::from_json(&bytes).unwrap_err().into();
    assert_eq!(ex.kind(), ExErrorKind::MissingField);
    assert_eq!(ex.entity_id(), Some("helloworld.Foo.method[0]"));
}

#[test]
fn test_json_inverted_reserved_range_is_rejected() {
    let bytes = serde_json::to_vec(&json!({
        "file": [{"package": "p", "messageType": [{"name": "M", "reservedRange": [{"start": 5, "end": 5}]}]}]
    }))
    .unwrap();

    let ex: protodiff_core::ExError = SchemaSnapshot::from_json(&bytes).unwrap_err().into();
    assert_eq!(ex.kind(), ExErrorKind::MalformedSchema);
    assert_eq!(ex.entity_id(), Some("p.M.reserved_range[0]"));
}

#[test]
fn test_json_malformed_document_is_serialization_error() {
    let ex: protodiff_core::ExError = SchemaSnapshot::from_json(br#"{"file": 3}"#)
        .unwrap_err()
        .into();
    assert_eq!(ex.kind(), ExErrorKind::Serialization);
}

#[test]
fn test_serialized_snapshot_reads_back_identically() {
    let original = helloworld(
        json!([{"name": "HelloRequest", "field": [string_field("name", 1)], "reservedName": ["old"], "reservedRange": [{"start": 4, "end": 6}]}]),
        json!([{"name": "FOO", "value": [{"name": "zero", "number": 0}]}]),
        json!([{"name": "Foo", "method": [
            {"name": "A", "inputType": ".p.X", "outputType": ".p.Y"},
            {"name": "B", "inputType": ".p.X", "outputType": ".p.Y", "serverStreaming": true}
        ]}]),
    );

    let bytes = serde_json::to_vec(&original).unwrap();
    assert_eq!(SchemaSnapshot::from_json(&bytes).unwrap(), original);
}
