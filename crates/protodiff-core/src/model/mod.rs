pub mod descriptor;
pub mod field_kind;
mod json;
pub mod schema;

pub use field_kind::{FieldType, Label};
pub use schema::{
    EnumDecl, EnumValueDecl, FieldDecl, FileUnit, MessageDecl, MethodDecl, ReservedRange,
    SchemaSnapshot, ServiceDecl,
};
