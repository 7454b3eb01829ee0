//! Snapshot construction from compiler output.
//!
//! Compiled descriptors mark every attribute optional. This module is the
//! single place where presence is checked: each constructor either yields a
//! fully-populated [`SchemaSnapshot`] or a [`SchemaError`] naming the
//! declaration that is missing something.

use prost::Message;
use prost_types::compiler::CodeGeneratorRequest;
use prost_types::{
    DescriptorProto, EnumDescriptorProto, FieldDescriptorProto, FileDescriptorProto,
    FileDescriptorSet, MethodDescriptorProto, ServiceDescriptorProto,
};

use super::field_kind::{FieldType, Label};
use super::json::DescriptorSetJson;
use super::schema::{
    EnumDecl, EnumValueDecl, FieldDecl, FileUnit, MessageDecl, MethodDecl, ReservedRange,
    SchemaSnapshot, ServiceDecl,
};
use crate::errors::{Result, SchemaError};
use crate::{log_op_end, log_op_error, log_op_start};

impl SchemaSnapshot {
    /// Build a snapshot from a list of compiled file descriptors.
    ///
    /// # Errors
    ///
    /// Returns a [`SchemaError`] for the first declaration that lacks a
    /// required attribute or carries an out-of-vocabulary type or label.
    pub fn from_file_descriptors(files: &[FileDescriptorProto]) -> Result<Self> {
        let files = files
            .iter()
            .enumerate()
            .map(|(index, file)| file_unit(index, file))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(files))
    }

    /// Decode protobuf wire bytes of a `FileDescriptorSet` (as written by
    /// `protoc -o`).
    ///
    /// # Errors
    ///
    /// `SchemaError::Decode` when the bytes are not a descriptor set, or any
    /// validation error from [`SchemaSnapshot::from_file_descriptors`].
    pub fn decode_descriptor_set(bytes: &[u8]) -> Result<Self> {
        decode_with("decode_descriptor_set", bytes, |bytes| {
            let set = FileDescriptorSet::decode(bytes).map_err(|e| SchemaError::Decode {
                what: "FileDescriptorSet".to_string(),
                message: e.to_string(),
            })?;
            SchemaSnapshot::try_from(&set)
        })
    }

    /// Decode protobuf wire bytes of a `CodeGeneratorRequest` (as handed to a
    /// compiler plugin on stdin).
    ///
    /// # Errors
    ///
    /// `SchemaError::Decode` when the bytes are not a request, or any
    /// validation error from [`SchemaSnapshot::from_file_descriptors`].
    pub fn decode_code_generator_request(bytes: &[u8]) -> Result<Self> {
        decode_with("decode_code_generator_request", bytes, |bytes| {
            let request =
                CodeGeneratorRequest::decode(bytes).map_err(|e| SchemaError::Decode {
                    what: "CodeGeneratorRequest".to_string(),
                    message: e.to_string(),
                })?;
            SchemaSnapshot::try_from(&request)
        })
    }

    /// Parse the protobuf JSON mapping of a descriptor set.
    ///
    /// Enum attributes may be given by name (`"TYPE_STRING"`) or number.
    /// The document is validated exactly like a wire-encoded set.
    ///
    /// # Errors
    ///
    /// `SchemaError::Json` when the bytes are not JSON of the descriptor
    /// shape, or any validation error from
    /// [`SchemaSnapshot::from_file_descriptors`].
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        decode_with("snapshot_from_json", bytes, |bytes| {
            let set: DescriptorSetJson =
                serde_json::from_slice(bytes).map_err(|e| SchemaError::Json {
                    message: e.to_string(),
                })?;
            SchemaSnapshot::try_from(&FileDescriptorSet::from(set))
        })
    }
}

impl TryFrom<&FileDescriptorSet> for SchemaSnapshot {
    type Error = SchemaError;

    fn try_from(set: &FileDescriptorSet) -> Result<Self> {
        SchemaSnapshot::from_file_descriptors(&set.file)
    }
}

impl TryFrom<&CodeGeneratorRequest> for SchemaSnapshot {
    type Error = SchemaError;

    fn try_from(request: &CodeGeneratorRequest) -> Result<Self> {
        SchemaSnapshot::from_file_descriptors(&request.proto_file)
    }
}

fn decode_with<F>(op: &str, bytes: &[u8], decode: F) -> Result<SchemaSnapshot>
where
    F: FnOnce(&[u8]) -> Result<SchemaSnapshot>,
{
    log_op_start!(op, byte_len = bytes.len() as u64);
    let start = std::time::Instant::now();

    let snapshot = decode(bytes).map_err(|e| {
        log_op_error!(
            op,
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        op,
        duration_ms = start.elapsed().as_millis() as u64,
        file_count = snapshot.files.len() as u64
    );
    Ok(snapshot)
}

/// Join a package and a declaration name the way the compiler qualifies them.
fn qualify(package: &str, name: &str) -> String {
    if package.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", package, name)
    }
}

fn required<'a, T>(value: &'a Option<T>, path: &str, attribute: &str) -> Result<&'a T> {
    value
        .as_ref()
        .ok_or_else(|| SchemaError::missing(path, attribute))
}

fn file_unit(index: usize, file: &FileDescriptorProto) -> Result<FileUnit> {
    let package = file.package.clone().unwrap_or_default();
    let file_path = file
        .name
        .clone()
        .unwrap_or_else(|| format!("file[{}]", index));

    let messages = file
        .message_type
        .iter()
        .enumerate()
        .map(|(i, m)| message_decl(&package, &file_path, i, m))
        .collect::<Result<Vec<_>>>()?;
    let enums = file
        .enum_type
        .iter()
        .enumerate()
        .map(|(i, e)| enum_decl(&package, &file_path, i, e))
        .collect::<Result<Vec<_>>>()?;
    let services = file
        .service
        .iter()
        .enumerate()
        .map(|(i, s)| service_decl(&package, &file_path, i, s))
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(
        file = %file_path,
        package = %package,
        messages = messages.len(),
        enums = enums.len(),
        services = services.len(),
        "validated file descriptor"
    );

    Ok(FileUnit {
        name: file.name.clone().unwrap_or_default(),
        package,
        messages,
        enums,
        services,
    })
}

fn message_decl(
    package: &str,
    file_path: &str,
    index: usize,
    message: &DescriptorProto,
) -> Result<MessageDecl> {
    let name = required(
        &message.name,
        &format!("{}.message_type[{}]", file_path, index),
        "name",
    )?;
    let path = qualify(package, name);

    let fields = message
        .field
        .iter()
        .enumerate()
        .map(|(i, f)| field_decl(&format!("{}.field[{}]", path, i), f))
        .collect::<Result<Vec<_>>>()?;

    let reserved_ranges = message
        .reserved_range
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let range_path = format!("{}.reserved_range[{}]", path, i);
            let start = *required(&r.start, &range_path, "start")?;
            let end = *required(&r.end, &range_path, "end")?;
            if end <= start {
                return Err(SchemaError::InvalidReservedRange {
                    path: range_path,
                    start,
                    end,
                });
            }
            Ok(ReservedRange::new(start, end))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(MessageDecl {
        name: name.clone(),
        fields,
        reserved_names: message.reserved_name.clone(),
        reserved_ranges,
    })
}

fn field_decl(path: &str, field: &FieldDescriptorProto) -> Result<FieldDecl> {
    let name = required(&field.name, path, "name")?;
    let number = *required(&field.number, path, "number")?;

    let raw_type = *required(&field.r#type, path, "type")?;
    let field_type = FieldType::try_from(raw_type).map_err(|_| SchemaError::UnknownFieldType {
        path: path.to_string(),
        value: raw_type,
    })?;

    let raw_label = *required(&field.label, path, "label")?;
    let label = Label::try_from(raw_label).map_err(|_| SchemaError::UnknownLabel {
        path: path.to_string(),
        value: raw_label,
    })?;

    Ok(FieldDecl {
        name: name.clone(),
        number,
        label,
        field_type,
        type_name: field.type_name.clone(),
    })
}

fn enum_decl(
    package: &str,
    file_path: &str,
    index: usize,
    decl: &EnumDescriptorProto,
) -> Result<EnumDecl> {
    let name = required(
        &decl.name,
        &format!("{}.enum_type[{}]", file_path, index),
        "name",
    )?;
    let path = qualify(package, name);

    let values = decl
        .value
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let value_path = format!("{}.value[{}]", path, i);
            Ok(EnumValueDecl {
                name: required(&v.name, &value_path, "name")?.clone(),
                number: *required(&v.number, &value_path, "number")?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(EnumDecl {
        name: name.clone(),
        values,
    })
}

fn service_decl(
    package: &str,
    file_path: &str,
    index: usize,
    decl: &ServiceDescriptorProto,
) -> Result<ServiceDecl> {
    let name = required(
        &decl.name,
        &format!("{}.service[{}]", file_path, index),
        "name",
    )?;
    let path = qualify(package, name);

    let methods = decl
        .method
        .iter()
        .enumerate()
        .map(|(i, m)| method_decl(&format!("{}.method[{}]", path, i), m))
        .collect::<Result<Vec<_>>>()?;

    Ok(ServiceDecl {
        name: name.clone(),
        methods,
    })
}

fn method_decl(path: &str, method: &MethodDescriptorProto) -> Result<MethodDecl> {
    Ok(MethodDecl {
        name: required(&method.name, path, "name")?.clone(),
        input_type: required(&method.input_type, path, "input_type")?.clone(),
        output_type: required(&method.output_type, path, "output_type")?.clone(),
        // Streaming is the presence of the attribute, not its value.
        client_streaming: method.client_streaming.is_some(),
        server_streaming: method.server_streaming.is_some(),
    })
}
