//! Diff entry points.
//!
//! [`diff`] compares two validated snapshots. [`diff_descriptor_sets`] and
//! [`diff_requests`] accept raw compiler output, validate it, then diff.

use prost_types::compiler::CodeGeneratorRequest;
use prost_types::FileDescriptorSet;

use super::enums::diff_enums;
use super::message::diff_messages;
use super::model::{Change, Report};
use super::namespace::{group_by_package, Namespace};
use super::service::diff_services;
use crate::errors::ExError;
use crate::model::SchemaSnapshot;
use crate::{log_op_end, log_op_error, log_op_start};

/// Compare `previous` against `current` and report every backward-incompatible
/// change.
///
/// Additions are never reported. Packages are visited in name order; inside a
/// package enums are compared first, then services, then messages.
pub fn diff(previous: &SchemaSnapshot, current: &SchemaSnapshot) -> Report {
    log_op_start!(
        "diff",
        previous_files = previous.files.len() as u64,
        current_files = current.files.len() as u64
    );
    let start = std::time::Instant::now();

    let report = diff_snapshots(previous, current);

    log_op_end!(
        "diff",
        duration_ms = start.elapsed().as_millis() as u64,
        problem_count = report.len() as u64
    );
    report
}

/// Validate two descriptor sets and diff them.
///
/// # Errors
///
/// `MissingField` / `MalformedSchema` when either set is not fully populated.
/// Incompatibilities are never errors here; call [`Report::check`] for a
/// pass/fail signal.
pub fn diff_descriptor_sets(
    previous: &FileDescriptorSet,
    current: &FileDescriptorSet,
) -> Result<Report, ExError> {
    diff_validated("diff_descriptor_sets", || {
        Ok((
            SchemaSnapshot::try_from(previous)?,
            SchemaSnapshot::try_from(current)?,
        ))
    })
}

/// Validate two code generator requests and diff the files they carry.
///
/// # Errors
///
/// `MissingField` / `MalformedSchema` when either request is not fully
/// populated.
pub fn diff_requests(
    previous: &CodeGeneratorRequest,
    current: &CodeGeneratorRequest,
) -> Result<Report, ExError> {
    diff_validated("diff_requests", || {
        Ok((
            SchemaSnapshot::try_from(previous)?,
            SchemaSnapshot::try_from(current)?,
        ))
    })
}

fn diff_validated<F>(op: &str, build: F) -> Result<Report, ExError>
where
    F: FnOnce() -> crate::errors::Result<(SchemaSnapshot, SchemaSnapshot)>,
{
    log_op_start!(op);
    let start = std::time::Instant::now();

    let (previous, current) = build().map_err(|e| {
        log_op_error!(
            op,
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        ExError::from(e).with_op(op)
    })?;
    let report = diff(&previous, &current);

    log_op_end!(
        op,
        duration_ms = start.elapsed().as_millis() as u64,
        problem_count = report.len() as u64
    );
    Ok(report)
}

fn diff_snapshots(previous: &SchemaSnapshot, current: &SchemaSnapshot) -> Report {
    let mut report = Report::new();

    let prev_by_package = group_by_package(previous);
    let curr_by_package = group_by_package(current);

    for (package, files) in &prev_by_package {
        let Some(next) = curr_by_package.get(package) else {
            report.push(Change::RemovedPackage {
                package: package.to_string(),
            });
            continue;
        };
        diff_package(&mut report, files, next);
    }

    report
}

fn diff_package(report: &mut Report, previous: &Namespace<'_>, current: &Namespace<'_>) {
    let before = report.len();

    diff_enums(report, previous, current);
    diff_services(report, previous, current);
    diff_messages(report, previous, current);

    tracing::debug!(
        package = previous.package(),
        problems = report.len() - before,
        "compared package"
    );
}
