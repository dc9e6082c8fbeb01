//! Data-access seam for declarations and payload sources

use crate::errors::ExError;
use crate::model::{Declaration, DeclarationRef, PayloadSource, SourceRef};
use crate::verify::cancel::CancelToken;

/// Read-only access to stored declarations and their payloads
///
/// Implementations must be idempotent and must report a missing declaration
/// or source with a `NotFound` error, distinct from every other failure.
#[cfg_attr(test, mockall::automock)]
pub trait PayloadFetcher {
    /// Resolve a declaration to the sources it references
    fn fetch_declaration(&self, reference: &DeclarationRef, cancel: &CancelToken) -> Result<Declaration, ExError>;

    /// Read every data key of one source
    ///
    /// Entries are returned in a stable order (sorted by key).
    fn fetch_source(&self, source: &SourceRef, cancel: &CancelToken) -> Result<Vec<PayloadSource>, ExError>;
}

impl<T: PayloadFetcher + ?Sized> PayloadFetcher for &T {
    fn fetch_declaration(&self, reference: &DeclarationRef, cancel: &CancelToken) -> Result<Declaration, ExError> {
        (**self).fetch_declaration(reference, cancel)
    }

    fn fetch_source(&self, source: &SourceRef, cancel: &CancelToken) -> Result<Vec<PayloadSource>, ExError> {
        (**self).fetch_source(source, cancel)
    }
}
