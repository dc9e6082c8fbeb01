//! Error handling for mrcheck-store
//!
//! Wraps mrcheck-core ExError with store-specific helpers

use mrcheck_core::errors::{ExError, ExErrorKind, VerifyError};
use mrcheck_core::{DeclarationRef, SourceRef};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

pub fn declaration_not_found(reference: &DeclarationRef) -> ExError {
    VerifyError::DeclarationNotFound {
        namespace: reference.namespace.clone(),
        name: reference.name.clone(),
    }
    .into()
}

pub fn source_not_found(source: &SourceRef) -> ExError {
    VerifyError::SourceNotFound {
        namespace: source.namespace.clone(),
        name: source.name.clone(),
    }
    .into()
}

/// Create a declaration validation error
pub fn declaration_validation(reason: &str) -> ExError {
    ExError::new(ExErrorKind::InvalidInput)
        .with_op("declaration_parse")
        .with_message(reason.to_string())
}

/// Create an error for a name that cannot be used as a path segment
pub fn invalid_segment(segment: &str, reason: &str) -> ExError {
    ExError::from(VerifyError::InvalidName {
        segment: segment.to_string(),
        reason: reason.to_string(),
    })
    .with_op("resolve_path")
}

/// Create an error for a stored data key that is not valid UTF-8
pub fn invalid_data_key(source: &SourceRef, key: &std::ffi::OsStr) -> ExError {
    ExError::new(ExErrorKind::InvalidInput)
        .with_op("read_source_dir")
        .with_source_ref(source.to_string())
        .with_message(format!("data key {:?} is not valid UTF-8", key))
}

/// Create an error for a poisoned in-memory store lock
pub fn lock_poisoned(op: &str) -> ExError {
    ExError::new(ExErrorKind::Internal)
        .with_op(op.to_string())
        .with_message("store lock poisoned")
}

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}

/// Create a serialization error
pub fn serialization_error(operation: &str, err: serde_yaml::Error) -> ExError {
    ExError::new(ExErrorKind::Serialization)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}
