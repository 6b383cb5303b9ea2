use std::path::Path;

use crate::domain::{error::DomainError, index::DeclarationIndex, meta::Meta};

/// Centralized domain validation.
///
/// All validation logic lives here, not scattered across callers.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_meta(meta: &Meta) -> Result<(), DomainError> {
        meta.validate()
    }

    /// Index `source`, mapping a structural error to [`DomainError::Parse`]
    /// positioned inside the file at `path`.
    pub fn validate_source(path: &Path, source: &str) -> Result<DeclarationIndex, DomainError> {
        DeclarationIndex::parse(source).map_err(|e| DomainError::parse(path, source, e))
    }
}
