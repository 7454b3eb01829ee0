//! Core types shared across protodiff facilities
//!
//! This crate holds the canonical schema constants used by the logging
//! facility and by anything that consumes its structured events.

pub mod schema;
