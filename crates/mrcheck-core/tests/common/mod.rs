use mrcheck_core::codec::compress;
use mrcheck_core::errors::{ExError, VerifyError};
use mrcheck_core::{
    CancelToken, Declaration, DeclarationRef, ObjectSet, PayloadFetcher, PayloadSource, SourceRef, TypeRegistry,
};
use std::cell::Cell;
use std::collections::BTreeMap;

/// In-memory fetcher for integration tests
///
/// Counts fetches so tests can assert how far a verification got.
#[derive(Default)]
#[allow(dead_code)]
pub struct StaticFetcher {
    declarations: BTreeMap<DeclarationRef, Vec<String>>,
    sources: BTreeMap<SourceRef, BTreeMap<String, Vec<u8>>>,
    pub source_fetches: Cell<usize>,
}

#[allow(dead_code)]
impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_declaration(mut self, namespace: &str, name: &str, sources: &[&str]) -> Self {
        self.declarations.insert(
            DeclarationRef::new(namespace, name),
            sources.iter().map(|s| s.to_string()).collect(),
        );
        self
    }

    /// Store `text` under `key`, compressing it when the key asks for it
    pub fn with_entry(mut self, namespace: &str, source: &str, key: &str, text: &str) -> Self {
        let data = if key.ends_with(".br") {
            compress(text.as_bytes()).unwrap()
        } else {
            text.as_bytes().to_vec()
        };
        self.with_raw_entry(namespace, source, key, data)
    }

    pub fn with_raw_entry(mut self, namespace: &str, source: &str, key: &str, data: Vec<u8>) -> Self {
        self.sources
            .entry(SourceRef::new(namespace, source))
            .or_default()
            .insert(key.to_string(), data);
        self
    }
}

impl PayloadFetcher for StaticFetcher {
    fn fetch_declaration(&self, reference: &DeclarationRef, _cancel: &CancelToken) -> Result<Declaration, ExError> {
        let sources = self.declarations.get(reference).ok_or_else(|| {
            ExError::from(VerifyError::DeclarationNotFound {
                namespace: reference.namespace.clone(),
                name: reference.name.clone(),
            })
        })?;
        Ok(Declaration::new(
            reference.namespace.clone(),
            reference.name.clone(),
            sources.iter().cloned(),
        ))
    }

    fn fetch_source(&self, source: &SourceRef, _cancel: &CancelToken) -> Result<Vec<PayloadSource>, ExError> {
        self.source_fetches.set(self.source_fetches.get() + 1);
        let entries = self.sources.get(source).ok_or_else(|| {
            ExError::from(VerifyError::SourceNotFound {
                namespace: source.namespace.clone(),
                name: source.name.clone(),
            })
        })?;
        Ok(entries
            .iter()
            .map(|(key, data)| PayloadSource::new(source.clone(), key.clone(), data.clone()))
            .collect())
    }
}

/// A namespaced `v1/Service` manifest exposing one port
#[allow(dead_code)]
pub fn service(namespace: &str, name: &str, port: u16) -> String {
    format!(
        "apiVersion: v1\nkind: Service\nmetadata:\n  name: {name}\n  namespace: {namespace}\nspec:\n  ports:\n  - port: {port}\n"
    )
}

/// A namespaced `v1/ConfigMap` manifest with a single data entry
#[allow(dead_code)]
pub fn config_map(namespace: &str, name: &str, value: &str) -> String {
    format!(
        "apiVersion: v1\nkind: ConfigMap\nmetadata:\n  name: {name}\n  namespace: {namespace}\ndata:\n  value: {value}\n"
    )
}

/// Join manifests into one multi-document payload
#[allow(dead_code)]
pub fn documents(docs: &[String]) -> String {
    docs.join("---\n")
}

#[allow(dead_code)]
pub fn expected_set(docs: &[String]) -> ObjectSet {
    ObjectSet::from_yaml(&TypeRegistry::with_core_kinds(), &documents(docs)).unwrap()
}
