//! Type discriminators and canonical object identities

use crate::errors::{ExError, VerifyError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// API group, version and kind of an object
///
/// The core API group is the empty string, so `apiVersion: v1` parses to
/// group `""` and version `"v1"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GroupVersionKind {
    pub group: String,
    pub version: String,
    pub kind: String,
}

impl GroupVersionKind {
    pub fn new(group: impl Into<String>, version: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            version: version.into(),
            kind: kind.into(),
        }
    }

    /// Parse an `apiVersion` string plus a kind
    ///
    /// # Errors
    ///
    /// `MalformedDocument` when the apiVersion or kind is empty, or the
    /// apiVersion has more than one `/`.
    pub fn from_api_version(api_version: &str, kind: &str) -> Result<Self, ExError> {
        let malformed = |reason: String| -> ExError {
            ExError::from(VerifyError::MalformedDocument { reason }).with_op("parse_gvk")
        };

        if kind.is_empty() {
            return Err(malformed("kind must not be empty".to_string()));
        }

        let (group, version) = match api_version.split_once('/') {
            Some((group, version)) => (group, version),
            None => ("", api_version),
        };
        if version.is_empty() || version.contains('/') || (api_version.contains('/') && group.is_empty()) {
            return Err(malformed(format!("invalid apiVersion {:?}", api_version)));
        }

        Ok(Self::new(group, version, kind))
    }

    /// The `apiVersion` string as written in manifests
    pub fn api_version(&self) -> String {
        if self.group.is_empty() {
            self.version.clone()
        } else {
            format!("{}/{}", self.group, self.version)
        }
    }
}

impl fmt::Display for GroupVersionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}, Kind={}", self.group, self.version, self.kind)
    }
}

/// Canonical key correlating available and expected objects
///
/// Rendered as `<gvk>__<namespace>__<name>`; cluster-scoped objects have an
/// empty namespace segment.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ObjectIdentity {
    pub gvk: GroupVersionKind,
    pub namespace: String,
    pub name: String,
}

impl ObjectIdentity {
    pub fn new(gvk: GroupVersionKind, namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            gvk,
            namespace: namespace.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for ObjectIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}__{}__{}", self.gvk, self.namespace, self.name)
    }
}
