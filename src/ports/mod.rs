//! Ports layer: Trait definitions for external operations.
//!
//! Following Hexagonal Architecture, these traits define the boundaries
//! between the application and external systems (record storage, monitors).

mod source;

pub use source::RecordSource;
