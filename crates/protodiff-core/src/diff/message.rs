//! Message and field comparison.

use std::collections::HashMap;

use super::model::{Change, Report};
use super::namespace::Namespace;
use super::reserved::{covering_range, is_field_reserved, is_name_reserved};
use crate::model::{FieldDecl, MessageDecl};

/// Compare every previous top-level message against its same-named
/// counterpart in `current`.
pub fn diff_messages(report: &mut Report, previous: &Namespace<'_>, current: &Namespace<'_>) {
    let curr = current.message_index();

    for message in previous.messages() {
        match curr.get(message.name.as_str()) {
            Some(next) => diff_message(report, message, next),
            None => report.push(Change::RemovedMessage {
                message: message.name.clone(),
            }),
        }
    }
}

/// Compare one matched pair of messages.
pub fn diff_message(report: &mut Report, previous: &MessageDecl, current: &MessageDecl) {
    diff_fields(report, previous, current);
    diff_reserved_names(report, previous, current);
    diff_reserved_ranges(report, previous, current);
}

fn diff_fields(report: &mut Report, previous: &MessageDecl, current: &MessageDecl) {
    let curr: HashMap<i32, &FieldDecl> = current.fields.iter().map(|f| (f.number, f)).collect();

    for field in &previous.fields {
        let Some(next) = curr.get(&field.number) else {
            if !is_field_reserved(current, field) {
                report.push(Change::RemovedField {
                    message: current.name.clone(),
                    field: field.name.clone(),
                });
            }
            continue;
        };

        if field.name != next.name {
            report.push(Change::ChangedFieldName {
                message: current.name.clone(),
                number: field.number,
                old_name: field.name.clone(),
                new_name: next.name.clone(),
            });
        }

        if field.field_type != next.field_type {
            report.push(Change::ChangedFieldType {
                message: current.name.clone(),
                field: field.name.clone(),
                old_type: field.field_type,
                new_type: next.field_type,
            });
        } else if let (Some(old_ref), Some(new_ref)) = (&field.type_name, &next.type_name) {
            // Compiler output is always fully qualified, so string equality
            // is reference equality.
            if old_ref != new_ref {
                report.push(Change::ChangedFieldReferenceType {
                    message: current.name.clone(),
                    field: field.name.clone(),
                    old_type: old_ref.clone(),
                    new_type: new_ref.clone(),
                });
            }
        }

        if field.label != next.label {
            report.push(Change::ChangedFieldLabel {
                message: current.name.clone(),
                field: field.name.clone(),
                old_label: field.label,
                new_label: next.label,
            });
        }
    }
}

fn diff_reserved_names(report: &mut Report, previous: &MessageDecl, current: &MessageDecl) {
    for name in &previous.reserved_names {
        if !is_name_reserved(current, name) {
            report.push(Change::UnreservedFieldName {
                message: current.name.clone(),
                name: name.clone(),
            });
        }
    }
}

// A previous range split across several current ranges is still reported.
// Re-declaring it as one range always fixes the report.
fn diff_reserved_ranges(report: &mut Report, previous: &MessageDecl, current: &MessageDecl) {
    for range in &previous.reserved_ranges {
        if covering_range(current, range).is_none() {
            report.push(Change::UnreservedFieldNumbers {
                message: current.name.clone(),
                start: range.start,
                end: range.end,
            });
        }
    }
}
