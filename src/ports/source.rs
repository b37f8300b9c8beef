//! Record source port: Trait for loading patient records.
//!
//! This trait abstracts where patient records come from (JSON exports,
//! monitor feeds) so the application layer stays free of I/O concerns.

use crate::domain::PatientRecord;

/// Trait for loading patient records from an external source.
pub trait RecordSource {
    /// Error type for loading operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load a single patient record.
    ///
    /// `reference` identifies the record within the source, e.g. a file
    /// path for file-backed sources.
    ///
    /// # Errors
    /// Returns error if the record cannot be found, read, or parsed.
    fn load(&self, reference: &str) -> Result<PatientRecord, Self::Error>;
}
