//! Declarations and the payload sources they reference

use crate::codec::compression;
use mrcheck_core_types::Sensitive;
use std::fmt;

/// Namespaced reference to a declaration (the record owning the payloads)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DeclarationRef {
    pub namespace: String,
    pub name: String,
}

impl DeclarationRef {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for DeclarationRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

/// Namespaced reference to one stored payload source
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourceRef {
    pub namespace: String,
    pub name: String,
}

impl SourceRef {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for SourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

/// A resolved declaration: its reference plus the sources to read
///
/// Source references are local: they live in the declaration's namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub reference: DeclarationRef,
    pub source_refs: Vec<SourceRef>,
}

impl Declaration {
    pub fn new<I, S>(namespace: impl Into<String>, name: impl Into<String>, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let reference = DeclarationRef::new(namespace, name);
        let source_refs = sources
            .into_iter()
            .map(|s| SourceRef::new(reference.namespace.clone(), s))
            .collect();
        Self {
            reference,
            source_refs,
        }
    }
}

/// One stored byte blob: a data key inside a payload source
///
/// The key suffix decides whether `data` is compressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadSource {
    pub source: SourceRef,
    pub key: String,
    pub data: Sensitive<Vec<u8>>,
}

impl PayloadSource {
    pub fn new(source: SourceRef, key: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            source,
            key: key.into(),
            data: Sensitive::new(data.into()),
        }
    }

    pub fn is_compressed(&self) -> bool {
        compression::is_compressed_key(&self.key)
    }
}
