//! Registry-driven document decoding

use crate::codec::registry::TypeRegistry;
use crate::errors::{ExError, VerifyError};
use crate::model::object::type_of;
use crate::model::StructuredObject;
use serde_json::Value;

/// Decodes single YAML documents into structured objects
///
/// Identity is resolved through the injected registry: a kind the registry
/// does not know is an error, never a silently untyped object.
#[derive(Debug, Clone, Copy)]
pub struct ObjectDecoder<'r> {
    registry: &'r TypeRegistry,
}

impl<'r> ObjectDecoder<'r> {
    pub fn new(registry: &'r TypeRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'r TypeRegistry {
        self.registry
    }

    /// Decode one document
    ///
    /// # Errors
    ///
    /// - `MalformedDocument` when the text is not YAML, is not a mapping, or
    ///   lacks `apiVersion`, `kind` or `metadata.name`
    /// - `UnknownKind` when the registry has no entry for the document's kind
    pub fn decode(&self, document: &str) -> Result<StructuredObject, ExError> {
        let value: Value = serde_yaml::from_str(document)
            .map_err(|e| ExError::from(VerifyError::from(e)).with_op("decode"))?;

        let gvk = type_of(&value)?;
        let decoder = self.registry.resolve(&gvk).ok_or_else(|| {
            ExError::from(VerifyError::UnknownKind {
                api_version: gvk.api_version(),
                kind: gvk.kind.clone(),
            })
            .with_op("decode")
        })?;

        decoder.decode(&gvk, value)
    }
}
