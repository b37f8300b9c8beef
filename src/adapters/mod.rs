//! Adapters layer: Concrete implementations of ports.
//!
//! These modules contain the actual integration with external concerns:
//! - `json`: File-backed patient record source
//! - `sanitize`: PII filtering for logs

pub mod json;
pub mod sanitize;

// Re-export source error for lib.rs
pub use json::SourceError;
