//! Package grouping.
//!
//! A namespace is every declaration in a snapshot that shares a package name,
//! flattened across files. It borrows from the snapshot and is rebuilt for
//! each diff.

use std::collections::{BTreeMap, HashMap};

use crate::model::{EnumDecl, FileUnit, MessageDecl, SchemaSnapshot, ServiceDecl};

/// All files of one snapshot that declare the same package.
#[derive(Debug, Clone)]
pub struct Namespace<'a> {
    package: &'a str,
    files: Vec<&'a FileUnit>,
}

impl<'a> Namespace<'a> {
    fn new(package: &'a str) -> Self {
        Self {
            package,
            files: Vec::new(),
        }
    }

    pub fn package(&self) -> &'a str {
        self.package
    }

    pub fn messages(&self) -> impl Iterator<Item = &'a MessageDecl> + '_ {
        self.files.iter().copied().flat_map(|f| f.messages.iter())
    }

    pub fn enums(&self) -> impl Iterator<Item = &'a EnumDecl> + '_ {
        self.files.iter().copied().flat_map(|f| f.enums.iter())
    }

    pub fn services(&self) -> impl Iterator<Item = &'a ServiceDecl> + '_ {
        self.files.iter().copied().flat_map(|f| f.services.iter())
    }

    /// Messages keyed by name. A duplicate name in a later file shadows the
    /// earlier declaration.
    pub fn message_index(&self) -> HashMap<&'a str, &'a MessageDecl> {
        self.messages().map(|m| (m.name.as_str(), m)).collect()
    }

    /// Enums keyed by name, later files shadowing earlier ones.
    pub fn enum_index(&self) -> HashMap<&'a str, &'a EnumDecl> {
        self.enums().map(|e| (e.name.as_str(), e)).collect()
    }

    /// Services keyed by name, later files shadowing earlier ones.
    pub fn service_index(&self) -> HashMap<&'a str, &'a ServiceDecl> {
        self.services().map(|s| (s.name.as_str(), s)).collect()
    }
}

/// Partition a snapshot's files by package.
///
/// Buckets are ordered by package name so that callers iterating the result
/// visit packages deterministically; files keep snapshot order within a
/// bucket.
pub fn group_by_package(snapshot: &SchemaSnapshot) -> BTreeMap<&str, Namespace<'_>> {
    let mut by_package: BTreeMap<&str, Namespace<'_>> = BTreeMap::new();
    for file in &snapshot.files {
        by_package
            .entry(file.package.as_str())
            .or_insert_with(|| Namespace::new(file.package.as_str()))
            .files
            .push(file);
    }
    by_package
}
