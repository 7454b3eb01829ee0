//! Protodiff Core - backward-compatibility checks for protobuf schemas
//!
//! Given a previous and a current set of compiled `.proto` files, this crate
//! reports every change that would break already-deployed clients or
//! generated code:
//! - Removed packages, messages, fields, enums, enum values, services, methods
//! - Field renames, type, reference-type and label changes
//! - Enum value renumbering and renaming
//! - RPC input/output type and streaming changes
//! - Dropped field name and field number reservations
//!
//! Input is either compiler output (`FileDescriptorSet`,
//! `CodeGeneratorRequest`, raw or wire-encoded) or the canonical protobuf
//! JSON rendering of a descriptor set. Everything is validated into a
//! [`SchemaSnapshot`] first; [`diff()`] then works on fully-populated data only.

pub mod diff;
pub mod errors;
pub mod logging_facility;
pub mod model;

// Re-export commonly used types
pub use diff::{diff, diff_descriptor_sets, diff_requests, render_human_summary, Change, Report};
pub use errors::{ExError, ExErrorKind, Result, SchemaError};
pub use model::SchemaSnapshot;
