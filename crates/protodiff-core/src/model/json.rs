//! Protobuf JSON mapping of a descriptor set.
//!
//! Every attribute is optional here, exactly as in the compiled descriptor.
//! The parsed document is converted into `prost_types` descriptors and then
//! validated by the same code as wire input, so a JSON document and its
//! binary encoding always yield the same snapshot and the same errors.

use prost_types::descriptor_proto::ReservedRange;
use prost_types::{
    DescriptorProto, EnumDescriptorProto, EnumValueDescriptorProto, FieldDescriptorProto,
    FileDescriptorProto, FileDescriptorSet, MethodDescriptorProto, ServiceDescriptorProto,
};
use serde::de::Error;
use serde::{Deserialize, Deserializer};

use super::field_kind::{DescriptorName, FieldType, Label};

#[derive(Debug, Default, Deserialize)]
pub(crate) struct DescriptorSetJson {
    #[serde(default)]
    file: Vec<FileJson>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileJson {
    name: Option<String>,
    package: Option<String>,
    #[serde(default)]
    message_type: Vec<MessageJson>,
    #[serde(default)]
    enum_type: Vec<EnumJson>,
    #[serde(default)]
    service: Vec<ServiceJson>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MessageJson {
    name: Option<String>,
    #[serde(default)]
    field: Vec<FieldJson>,
    #[serde(default)]
    reserved_range: Vec<RangeJson>,
    #[serde(default)]
    reserved_name: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FieldJson {
    name: Option<String>,
    number: Option<i32>,
    #[serde(default, deserialize_with = "label_number")]
    label: Option<i32>,
    #[serde(rename = "type", default, deserialize_with = "type_number")]
    field_type: Option<i32>,
    type_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RangeJson {
    start: Option<i32>,
    end: Option<i32>,
}

#[derive(Debug, Default, Deserialize)]
struct EnumJson {
    name: Option<String>,
    #[serde(default)]
    value: Vec<EnumValueJson>,
}

#[derive(Debug, Default, Deserialize)]
struct EnumValueJson {
    name: Option<String>,
    number: Option<i32>,
}

#[derive(Debug, Default, Deserialize)]
struct ServiceJson {
    name: Option<String>,
    #[serde(default)]
    method: Vec<MethodJson>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MethodJson {
    name: Option<String>,
    input_type: Option<String>,
    output_type: Option<String>,
    client_streaming: Option<bool>,
    server_streaming: Option<bool>,
}

/// Enum values may be written by name or by number.
#[derive(Deserialize)]
#[serde(untagged)]
enum EnumRepr {
    Number(i32),
    Name(String),
}

fn enum_number<'de, T, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    T: DescriptorName + Into<i32>,
    D: Deserializer<'de>,
{
    match Option::<EnumRepr>::deserialize(deserializer)? {
        None => Ok(None),
        // Out-of-range numbers are left for validation, which knows the path.
        Some(EnumRepr::Number(number)) => Ok(Some(number)),
        Some(EnumRepr::Name(name)) => T::from_name(&name)
            .map(|value| Some(value.into()))
            .ok_or_else(|| D::Error::custom(format!("unknown {} `{}`", T::KIND, name))),
    }
}

fn type_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i32>, D::Error> {
    enum_number::<FieldType, D>(deserializer)
}

fn label_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i32>, D::Error> {
    enum_number::<Label, D>(deserializer)
}

impl From<DescriptorSetJson> for FileDescriptorSet {
    fn from(set: DescriptorSetJson) -> Self {
        FileDescriptorSet {
            file: set.file.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<FileJson> for FileDescriptorProto {
    fn from(file: FileJson) -> Self {
        FileDescriptorProto {
            name: file.name,
            package: file.package,
            message_type: file.message_type.into_iter().map(Into::into).collect(),
            enum_type: file.enum_type.into_iter().map(Into::into).collect(),
            service: file.service.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }
}

impl From<MessageJson> for DescriptorProto {
    fn from(message: MessageJson) -> Self {
        DescriptorProto {
            name: message.name,
            field: message.field.into_iter().map(Into::into).collect(),
            reserved_range: message
                .reserved_range
                .into_iter()
                .map(|r| ReservedRange {
                    start: r.start,
                    end: r.end,
                })
                .collect(),
            reserved_name: message.reserved_name,
            ..Default::default()
        }
    }
}

impl From<FieldJson> for FieldDescriptorProto {
    fn from(field: FieldJson) -> Self {
        FieldDescriptorProto {
            name: field.name,
            number: field.number,
            label: field.label,
            r#type: field.field_type,
            type_name: field.type_name,
            ..Default::default()
        }
    }
}

impl From<EnumJson> for EnumDescriptorProto {
    fn from(decl: EnumJson) -> Self {
        EnumDescriptorProto {
            name: decl.name,
            value: decl
                .value
                .into_iter()
                .map(|v| EnumValueDescriptorProto {
                    name: v.name,
                    number: v.number,
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }
}

impl From<ServiceJson> for ServiceDescriptorProto {
    fn from(service: ServiceJson) -> Self {
        ServiceDescriptorProto {
            name: service.name,
            method: service
                .method
                .into_iter()
                .map(|m| MethodDescriptorProto {
                    name: m.name,
                    input_type: m.input_type,
                    output_type: m.output_type,
                    client_streaming: m.client_streaming,
                    server_streaming: m.server_streaming,
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }
}
