//! Field type and label vocabulary.
//!
//! Both come straight from the generated descriptor enums in `prost-types`;
//! this module only adds the serde mapping onto their canonical names
//! (`TYPE_STRING`, `LABEL_REPEATED`, ...).

pub use prost_types::field_descriptor_proto::{Label, Type as FieldType};

/// A generated descriptor enum addressed by its canonical name.
pub trait DescriptorName: Sized + Copy {
    /// What the value describes, for error messages
    const KIND: &'static str;

    fn name(&self) -> &'static str;

    fn from_name(name: &str) -> Option<Self>;
}

impl DescriptorName for FieldType {
    const KIND: &'static str = "field type";

    fn name(&self) -> &'static str {
        self.as_str_name()
    }

    fn from_name(name: &str) -> Option<Self> {
        FieldType::from_str_name(name)
    }
}

impl DescriptorName for Label {
    const KIND: &'static str = "field label";

    fn name(&self) -> &'static str {
        self.as_str_name()
    }

    fn from_name(name: &str) -> Option<Self> {
        Label::from_str_name(name)
    }
}

/// `#[serde(with = "...")]` adapter writing descriptor enums by name.
pub mod descriptor_name {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::DescriptorName;

    pub fn serialize<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: DescriptorName,
        S: Serializer,
    {
        serializer.serialize_str(value.name())
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
    where
        T: DescriptorName,
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        T::from_name(&name)
            .ok_or_else(|| D::Error::custom(format!("unknown {} `{}`", T::KIND, name)))
    }
}
