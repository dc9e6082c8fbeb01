//! Declaration YAML schema
//!
//! ```yaml
//! apiVersion: resources.gardener.cloud/v1alpha1
//! kind: ManagedResource
//! metadata:
//!   name: extension-objects
//!   namespace: shoot--dev
//! spec:
//!   secretRefs:
//!   - name: objects-a
//!   - name: objects-b
//! ```
//!
//! `apiVersion` and `kind` are optional; unknown fields are ignored.

use mrcheck_core::{Declaration, DeclarationRef};
use serde::{Deserialize, Serialize};

/// Top-level declaration file structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeclarationDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    pub metadata: DeclarationMetadata,

    #[serde(default)]
    pub spec: DeclarationSpec,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclarationMetadata {
    pub name: String,
    pub namespace: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeclarationSpec {
    /// Payload sources, in the declaration's namespace
    #[serde(default)]
    pub secret_refs: Vec<SecretRef>,

    /// Optional class label, carried through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretRef {
    pub name: String,
}

impl DeclarationDocument {
    pub fn reference(&self) -> DeclarationRef {
        DeclarationRef::new(self.metadata.namespace.clone(), self.metadata.name.clone())
    }

    pub fn to_declaration(&self) -> Declaration {
        Declaration::new(
            self.metadata.namespace.clone(),
            self.metadata.name.clone(),
            self.spec.secret_refs.iter().map(|r| r.name.clone()),
        )
    }
}

impl From<&Declaration> for DeclarationDocument {
    fn from(declaration: &Declaration) -> Self {
        Self {
            api_version: None,
            kind: None,
            metadata: DeclarationMetadata {
                name: declaration.reference.name.clone(),
                namespace: declaration.reference.namespace.clone(),
            },
            spec: DeclarationSpec {
                secret_refs: declaration
                    .source_refs
                    .iter()
                    .map(|s| SecretRef { name: s.name.clone() })
                    .collect(),
                class: None,
            },
        }
    }
}
