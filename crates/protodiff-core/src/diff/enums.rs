//! Enum comparison.
//!
//! Values are matched on two axes. The number pass reports values whose
//! number disappeared (renumbered if the name survives, removed otherwise).
//! The name pass reports values whose name disappeared while the number
//! survives (renamed). A value changed on both axes at once is only ever
//! reported as removed.

use std::collections::HashMap;

use super::model::{Change, Report};
use super::namespace::Namespace;
use crate::model::{EnumDecl, EnumValueDecl};

/// Compare every previous top-level enum against its same-named counterpart
/// in `current`.
pub fn diff_enums(report: &mut Report, previous: &Namespace<'_>, current: &Namespace<'_>) {
    let curr = current.enum_index();

    for decl in previous.enums() {
        match curr.get(decl.name.as_str()) {
            Some(next) => diff_enum(report, decl, next),
            None => report.push(Change::RemovedEnum {
                enum_name: decl.name.clone(),
            }),
        }
    }
}

/// Compare one matched pair of enums.
pub fn diff_enum(report: &mut Report, previous: &EnumDecl, current: &EnumDecl) {
    // Aliased numbers resolve to the last declared name.
    let by_number: HashMap<i32, &EnumValueDecl> =
        current.values.iter().map(|v| (v.number, v)).collect();
    let by_name: HashMap<&str, &EnumValueDecl> =
        current.values.iter().map(|v| (v.name.as_str(), v)).collect();

    for value in &previous.values {
        if by_number.contains_key(&value.number) {
            continue;
        }
        match by_name.get(value.name.as_str()) {
            Some(next) => report.push(Change::ChangedEnumValue {
                enum_name: previous.name.clone(),
                value: value.name.clone(),
                old_number: value.number,
                new_number: next.number,
            }),
            None => report.push(Change::RemovedEnumValue {
                enum_name: previous.name.clone(),
                value: value.name.clone(),
            }),
        }
    }

    for value in &previous.values {
        if by_name.contains_key(value.name.as_str()) {
            continue;
        }
        if let Some(next) = by_number.get(&value.number) {
            report.push(Change::ChangedEnumName {
                enum_name: previous.name.clone(),
                number: value.number,
                old_name: value.name.clone(),
                new_name: next.name.clone(),
            });
        }
    }
}
