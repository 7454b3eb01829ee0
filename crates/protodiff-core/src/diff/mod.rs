//! Backward-compatibility diff engine.
//!
//! Compares a previous and a current schema snapshot and produces an ordered
//! [`Report`] of every change that would break deployed clients or generated
//! code.
//!
//! ## Entry point
//!
//! ```ignore
//! use protodiff_core::diff::{diff, render_human_summary};
//!
//! let report = diff(&previous, &current);
//! report.check()?;
//! println!("{}", render_human_summary(&report));
//! ```
//!
//! ## Guarantees
//!
//! - **Directional**: additions (fields, values, methods, packages) are never
//!   reported; only what `previous` had and `current` lost or changed.
//! - **Determinism**: packages are visited in name order, everything else in
//!   declaration order, so identical inputs give identical reports.
//! - **Collect everything**: traversal never stops at the first problem.
//! - **Top level only**: nested message and enum declarations are not compared.

pub mod engine;
pub mod enums;
pub mod human_summary;
pub mod message;
pub mod model;
pub mod namespace;
pub mod reserved;
pub mod service;

pub use engine::{diff, diff_descriptor_sets, diff_requests};
pub use human_summary::render_human_summary;
pub use model::{Change, ChangeCategory, Report, StreamSide, TypeSide};
