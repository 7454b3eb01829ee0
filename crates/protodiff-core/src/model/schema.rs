use serde::{Deserialize, Deserializer, Serialize};

use super::field_kind::{descriptor_name, FieldType, Label};

/// One full, immutable description of a schema at one point in time.
///
/// Serializes using the protobuf JSON mapping of a descriptor set
/// (`{"file": [...]}` with lowerCamelCase keys), so a snapshot written by
/// `serde_json` can be read back by [`SchemaSnapshot::from_json`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SchemaSnapshot {
    /// Compiled files, in the order the compiler emitted them
    #[serde(rename = "file", default)]
    pub files: Vec<FileUnit>,
}

impl SchemaSnapshot {
    /// Create a snapshot from already-validated file units
    pub fn new(files: Vec<FileUnit>) -> Self {
        Self { files }
    }
}

/// The declarations of a single compiled source file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileUnit {
    /// Source file name, informational only
    #[serde(default)]
    pub name: String,
    /// Package the declarations belong to; empty for the default package
    #[serde(default)]
    pub package: String,
    #[serde(rename = "messageType", default)]
    pub messages: Vec<MessageDecl>,
    #[serde(rename = "enumType", default)]
    pub enums: Vec<EnumDecl>,
    #[serde(rename = "service", default)]
    pub services: Vec<ServiceDecl>,
}

/// A top-level message declaration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDecl {
    pub name: String,
    #[serde(rename = "field", default)]
    pub fields: Vec<FieldDecl>,
    /// Field names that may not be reused
    #[serde(rename = "reservedName", default)]
    pub reserved_names: Vec<String>,
    /// Field numbers that may not be reused
    #[serde(rename = "reservedRange", default)]
    pub reserved_ranges: Vec<ReservedRange>,
}

/// A message field. `number` is the stable wire identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDecl {
    pub name: String,
    pub number: i32,
    #[serde(with = "descriptor_name")]
    pub label: Label,
    #[serde(rename = "type", with = "descriptor_name")]
    pub field_type: FieldType,
    /// Fully-qualified referenced type (`.pkg.Name`) for message/enum kinds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
}

/// Half-open interval `[start, end)` of reserved field numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservedRange {
    pub start: i32,
    pub end: i32,
}

impl ReservedRange {
    pub fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }

    /// True when `number` lies inside `[start, end)`
    pub fn contains(&self, number: i32) -> bool {
        number >= self.start && number < self.end
    }

    /// True when `other` lies entirely inside this range
    pub fn covers(&self, other: &ReservedRange) -> bool {
        other.start >= self.start && other.end <= self.end
    }

    /// Number of field numbers in the range
    pub fn width(&self) -> i64 {
        i64::from(self.end) - i64::from(self.start)
    }
}

/// A top-level enum declaration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EnumDecl {
    pub name: String,
    /// Values in declaration order; several names may alias one number
    #[serde(rename = "value", default)]
    pub values: Vec<EnumValueDecl>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumValueDecl {
    pub name: String,
    pub number: i32,
}

/// A service declaration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ServiceDecl {
    pub name: String,
    #[serde(rename = "method", default)]
    pub methods: Vec<MethodDecl>,
}

/// An RPC method on a service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodDecl {
    pub name: String,
    pub input_type: String,
    pub output_type: String,
    /// Set when the attribute is present, whatever its value
    #[serde(
        default,
        deserialize_with = "attribute_present",
        skip_serializing_if = "is_false"
    )]
    pub client_streaming: bool,
    #[serde(
        default,
        deserialize_with = "attribute_present",
        skip_serializing_if = "is_false"
    )]
    pub server_streaming: bool,
}

fn attribute_present<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.is_some())
}

fn is_false(value: &bool) -> bool {
    !*value
}
