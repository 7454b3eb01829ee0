//! Structured logging facility
//!
//! Every decode and diff operation emits a `start` event and either an `end`
//! or an `end_error` event, each tagged with `component`, `op` and `event`
//! fields from [`protodiff_core_types::schema`].
//!
//! # Usage
//!
//! ```rust
//! use protodiff_core::logging_facility::{init, Profile};
//!
//! // Initialize once at startup; `RUST_LOG` overrides the profile filter
//! init(Profile::Development);
//! ```
//!
//! # Logging Macros
//!
//! - `log_op_start!(op, ...)` - Log operation start
//! - `log_op_end!(op, duration_ms = ...)` - Log operation end
//! - `log_op_error!(op, err, duration_ms = ...)` - Log operation error

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
