//! Structured objects decoded from manifests

use crate::diff::semantic;
use crate::errors::{ExError, ExErrorKind, VerifyError};
use crate::model::identity::{GroupVersionKind, ObjectIdentity};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Identifying metadata of an object
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ObjectMeta {
    pub name: String,
    /// Empty for cluster-scoped objects
    pub namespace: String,
    pub labels: BTreeMap<String, String>,
    pub annotations: BTreeMap<String, String>,
}

impl ObjectMeta {
    fn from_document(doc: &Map<String, Value>) -> Result<Self, ExError> {
        let malformed = |reason: &str| -> ExError {
            ExError::from(VerifyError::MalformedDocument {
                reason: reason.to_string(),
            })
            .with_op("read_metadata")
        };

        let metadata = match doc.get("metadata") {
            Some(Value::Object(m)) => m,
            Some(_) => return Err(malformed("metadata must be a mapping")),
            None => return Err(malformed("metadata is missing")),
        };

        let name = match metadata.get("name") {
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            _ => return Err(malformed("metadata.name must be a non-empty string")),
        };
        let namespace = match metadata.get("namespace") {
            Some(Value::String(s)) => s.clone(),
            None | Some(Value::Null) => String::new(),
            Some(_) => return Err(malformed("metadata.namespace must be a string")),
        };

        Ok(Self {
            name,
            namespace,
            labels: string_map(metadata.get("labels")),
            annotations: string_map(metadata.get("annotations")),
        })
    }
}

fn string_map(value: Option<&Value>) -> BTreeMap<String, String> {
    value
        .and_then(Value::as_object)
        .map(|m| {
            m.iter()
                .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
                .collect()
        })
        .unwrap_or_default()
}

/// One declared resource: type, metadata and full document content
///
/// `content` holds the whole document (including `apiVersion`, `kind` and
/// `metadata`) and is what semantic comparison runs over.
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredObject {
    gvk: GroupVersionKind,
    meta: ObjectMeta,
    content: Value,
}

impl StructuredObject {
    /// Build an object from a JSON document
    ///
    /// Reads `apiVersion`, `kind` and `metadata`. Does not consult a type
    /// registry; use [`ObjectDecoder`](crate::codec::ObjectDecoder) for that.
    ///
    /// # Errors
    ///
    /// `MalformedDocument` if the value is not a mapping or lacks identifying
    /// fields.
    pub fn from_value(content: Value) -> Result<Self, ExError> {
        let gvk = type_of(&content)?;
        let doc = content.as_object().ok_or_else(|| {
            ExError::new(ExErrorKind::MalformedDocument).with_message("document must be a mapping")
        })?;
        let meta = ObjectMeta::from_document(doc)?;
        Ok(Self { gvk, meta, content })
    }

    pub fn gvk(&self) -> &GroupVersionKind {
        &self.gvk
    }

    pub fn meta(&self) -> &ObjectMeta {
        &self.meta
    }

    pub fn name(&self) -> &str {
        &self.meta.name
    }

    pub fn namespace(&self) -> &str {
        &self.meta.namespace
    }

    pub fn content(&self) -> &Value {
        &self.content
    }

    pub fn into_content(self) -> Value {
        self.content
    }

    pub fn identity(&self) -> ObjectIdentity {
        ObjectIdentity::new(self.gvk.clone(), &self.meta.namespace, &self.meta.name)
    }

    /// Structural equality tolerating representation-only differences
    pub fn semantic_eq(&self, other: &StructuredObject) -> bool {
        self.gvk == other.gvk && semantic::semantic_eq(&self.content, &other.content)
    }

    /// Render the content as YAML for diagnostics
    ///
    /// Falls back to pretty JSON if YAML serialization fails.
    pub fn to_yaml(&self) -> String {
        serde_yaml::to_string(&self.content)
            .or_else(|_| serde_json::to_string_pretty(&self.content))
            .unwrap_or_else(|_| self.content.to_string())
    }
}

/// Read the type discriminator of a document
///
/// # Errors
///
/// `MalformedDocument` when `apiVersion` or `kind` is missing, not a string,
/// or unparsable.
pub fn type_of(content: &Value) -> Result<GroupVersionKind, ExError> {
    let doc = content.as_object().ok_or_else(|| {
        ExError::from(VerifyError::MalformedDocument {
            reason: format!("document must be a mapping, got {}", type_name(content)),
        })
        .with_op("read_type")
    })?;

    GroupVersionKind::from_api_version(str_field(doc, "apiVersion")?, str_field(doc, "kind")?)
}

fn str_field<'a>(doc: &'a Map<String, Value>, name: &str) -> Result<&'a str, ExError> {
    doc.get(name).and_then(Value::as_str).ok_or_else(|| {
        ExError::from(VerifyError::MalformedDocument {
            reason: format!("Object '{}' is missing or not a string", name),
        })
        .with_op("read_type")
    })
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}
