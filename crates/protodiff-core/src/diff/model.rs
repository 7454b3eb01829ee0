//! Diff output types.
//!
//! A [`Report`] is an ordered list of [`Change`]s. Every change renders to a
//! stable, human-readable line via `Display`; downstream tooling matches on
//! that text, so the templates here must not drift.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{ExError, ExErrorKind};
use crate::model::field_kind::descriptor_name;
use crate::model::{FieldType, Label};

/// Which side of an RPC method signature changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeSide {
    Input,
    Output,
}

impl fmt::Display for TypeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeSide::Input => f.write_str("input"),
            TypeSide::Output => f.write_str("output"),
        }
    }
}

/// Which end of an RPC method streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamSide {
    Client,
    Server,
}

impl fmt::Display for StreamSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamSide::Client => f.write_str("client"),
            StreamSide::Server => f.write_str("server"),
        }
    }
}

/// Coarse grouping of changes for summaries. All categories are breaking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ChangeCategory {
    /// A declaration that existed before is gone
    Removal,
    /// A declaration still exists but its shape changed
    Mutation,
    /// A reservation that protected a retired identity was dropped
    Reservation,
}

/// One backward-incompatible difference between two snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Change {
    RemovedPackage {
        package: String,
    },
    RemovedMessage {
        message: String,
    },
    RemovedField {
        message: String,
        field: String,
    },
    /// Keyed by number because the name is what changed
    ChangedFieldName {
        message: String,
        number: i32,
        old_name: String,
        new_name: String,
    },
    ChangedFieldType {
        message: String,
        field: String,
        #[serde(with = "descriptor_name")]
        old_type: FieldType,
        #[serde(with = "descriptor_name")]
        new_type: FieldType,
    },
    /// Same kind on both sides, different fully-qualified referenced type
    ChangedFieldReferenceType {
        message: String,
        field: String,
        old_type: String,
        new_type: String,
    },
    ChangedFieldLabel {
        message: String,
        field: String,
        #[serde(with = "descriptor_name")]
        old_label: Label,
        #[serde(with = "descriptor_name")]
        new_label: Label,
    },
    UnreservedFieldName {
        message: String,
        name: String,
    },
    /// `[start, end)` of the previous reservation
    UnreservedFieldNumbers {
        message: String,
        start: i32,
        end: i32,
    },
    RemovedEnum {
        #[serde(rename = "enum")]
        enum_name: String,
    },
    RemovedEnumValue {
        #[serde(rename = "enum")]
        enum_name: String,
        value: String,
    },
    ChangedEnumValue {
        #[serde(rename = "enum")]
        enum_name: String,
        value: String,
        old_number: i32,
        new_number: i32,
    },
    ChangedEnumName {
        #[serde(rename = "enum")]
        enum_name: String,
        number: i32,
        old_name: String,
        new_name: String,
    },
    RemovedService {
        service: String,
    },
    RemovedServiceMethod {
        service: String,
        method: String,
    },
    ChangedMethodType {
        service: String,
        method: String,
        side: TypeSide,
        old_type: String,
        new_type: String,
    },
    ChangedMethodStreaming {
        service: String,
        method: String,
        side: StreamSide,
        old_streaming: bool,
        new_streaming: bool,
    },
}

impl Change {
    pub fn category(&self) -> ChangeCategory {
        match self {
            Change::RemovedPackage { .. }
            | Change::RemovedMessage { .. }
            | Change::RemovedField { .. }
            | Change::RemovedEnum { .. }
            | Change::RemovedEnumValue { .. }
            | Change::RemovedService { .. }
            | Change::RemovedServiceMethod { .. } => ChangeCategory::Removal,

            Change::ChangedFieldName { .. }
            | Change::ChangedFieldType { .. }
            | Change::ChangedFieldReferenceType { .. }
            | Change::ChangedFieldLabel { .. }
            | Change::ChangedEnumValue { .. }
            | Change::ChangedEnumName { .. }
            | Change::ChangedMethodType { .. }
            | Change::ChangedMethodStreaming { .. } => ChangeCategory::Mutation,

            Change::UnreservedFieldName { .. } | Change::UnreservedFieldNumbers { .. } => {
                ChangeCategory::Reservation
            }
        }
    }
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Change::RemovedPackage { package } => write!(f, "removed package '{}'", package),
            Change::RemovedMessage { message } => write!(f, "removed message '{}'", message),
            Change::RemovedField { message, field } => {
                write!(f, "removed field '{}' from message '{}'", field, message)
            }
            Change::ChangedFieldName {
                message,
                number,
                old_name,
                new_name,
            } => write!(
                f,
                "changed name for field #{} on message '{}': {} -> {}",
                number, message, old_name, new_name
            ),
            Change::ChangedFieldType {
                message,
                field,
                old_type,
                new_type,
            } => write!(
                f,
                "changed types for field '{}' on message '{}': {} -> {}",
                field,
                message,
                old_type.as_str_name(),
                new_type.as_str_name()
            ),
            Change::ChangedFieldReferenceType {
                message,
                field,
                old_type,
                new_type,
            } => write!(
                f,
                "changed types for field '{}' on message '{}': {} -> {}",
                field, message, old_type, new_type
            ),
            Change::ChangedFieldLabel {
                message,
                field,
                old_label,
                new_label,
            } => write!(
                f,
                "changed label for field '{}' on message '{}': {} -> {}",
                field,
                message,
                old_label.as_str_name(),
                new_label.as_str_name()
            ),
            Change::UnreservedFieldName { message, name } => write!(
                f,
                "un-reserved field name '{}' from message '{}'",
                name, message
            ),
            Change::UnreservedFieldNumbers {
                message,
                start,
                end,
            } => {
                if i64::from(*end) - i64::from(*start) > 1 {
                    write!(
                        f,
                        "un-reserved field number(s) in range {} to {} from message '{}'",
                        start,
                        end - 1,
                        message
                    )
                } else {
                    write!(
                        f,
                        "un-reserved field number {} from message '{}'",
                        start, message
                    )
                }
            }
            Change::RemovedEnum { enum_name } => write!(f, "removed enum '{}'", enum_name),
            Change::RemovedEnumValue { enum_name, value } => {
                write!(f, "removed value '{}' from enum '{}'", value, enum_name)
            }
            Change::ChangedEnumValue {
                enum_name,
                value,
                old_number,
                new_number,
            } => write!(
                f,
                "changed value '{}' on enum '{}': {} -> {}",
                value, enum_name, old_number, new_number
            ),
            Change::ChangedEnumName {
                enum_name,
                number,
                old_name,
                new_name,
            } => write!(
                f,
                "changed name of field #{} on enum '{}': {} -> {}",
                number, enum_name, old_name, new_name
            ),
            Change::RemovedService { service } => write!(f, "removed service '{}'", service),
            Change::RemovedServiceMethod { service, method } => {
                write!(f, "removed method '{}' from service '{}'", method, service)
            }
            Change::ChangedMethodType {
                service,
                method,
                side,
                old_type,
                new_type,
            } => write!(
                f,
                "changed {} type for method '{}' on service '{}': {} -> {}",
                side, method, service, old_type, new_type
            ),
            Change::ChangedMethodStreaming {
                service,
                method,
                side,
                old_streaming,
                new_streaming,
            } => write!(
                f,
                "changed {} streaming for method '{}' on service '{}': {} -> {}",
                side, method, service, old_streaming, new_streaming
            ),
        }
    }
}

/// Ordered, append-only collection of every change one diff found.
///
/// The report is the authoritative result. [`Report::check`] derives the
/// pass/fail signal from it on demand, so the two can never disagree.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Report {
    changes: Vec<Change>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a change in discovery order
    pub fn push(&mut self, change: Change) {
        self.changes.push(change);
    }

    pub fn changes(&self) -> &[Change] {
        &self.changes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Change> {
        self.changes.iter()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// True when no backward-incompatible change was found
    pub fn is_compatible(&self) -> bool {
        self.is_empty()
    }

    /// Derived failure signal for pass/fail gating.
    ///
    /// # Errors
    ///
    /// `BreakingChanges` when the report is non-empty, with the message
    /// `found N problems: [<change> <change> ...]`.
    pub fn check(&self) -> Result<(), ExError> {
        if self.is_empty() {
            return Ok(());
        }
        Err(ExError::new(ExErrorKind::BreakingChanges)
            .with_op("diff")
            .with_problem_count(self.len())
            .with_message(format!("found {} problems: {}", self.len(), self)))
    }
}

/// Renders as a bracketed, space-separated list of change lines.
impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, change) in self.changes.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", change)?;
        }
        f.write_str("]")
    }
}

impl<'a> IntoIterator for &'a Report {
    type Item = &'a Change;
    type IntoIter = std::slice::Iter<'a, Change>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.iter()
    }
}

impl IntoIterator for Report {
    type Item = Change;
    type IntoIter = std::vec::IntoIter<Change>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.into_iter()
    }
}
