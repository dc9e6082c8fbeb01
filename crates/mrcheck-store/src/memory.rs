//! In-memory payload store
//!
//! Same fetch semantics as the filesystem store, without touching disk.
//! Useful for embedding the verifier and for tests.

use crate::errors::{declaration_not_found, lock_poisoned, source_not_found, Result};
use crate::fs::layout::validate_segment;
use crate::payload::encode_documents;
use mrcheck_core::{CancelToken, Declaration, DeclarationRef, PayloadFetcher, PayloadSource, SourceRef};
use std::collections::BTreeMap;
use std::sync::RwLock;

type Entries = BTreeMap<String, Vec<u8>>;

#[derive(Debug, Default)]
pub struct MemoryPayloadStore {
    declarations: RwLock<BTreeMap<DeclarationRef, Declaration>>,
    sources: RwLock<BTreeMap<SourceRef, Entries>>,
}

impl MemoryPayloadStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put_declaration(&self, declaration: Declaration) -> Result<()> {
        validate_segment(&declaration.reference.namespace)?;
        validate_segment(&declaration.reference.name)?;
        self.declarations
            .write()
            .map_err(|_| lock_poisoned("put_declaration"))?
            .insert(declaration.reference.clone(), declaration);
        Ok(())
    }

    pub fn put_entry(&self, source: &SourceRef, key: &str, data: impl Into<Vec<u8>>) -> Result<()> {
        validate_segment(&source.namespace)?;
        validate_segment(&source.name)?;
        validate_segment(key)?;
        self.sources
            .write()
            .map_err(|_| lock_poisoned("put_entry"))?
            .entry(source.clone())
            .or_default()
            .insert(key.to_string(), data.into());
        Ok(())
    }

    pub fn put_objects<S: AsRef<str>>(&self, source: &SourceRef, key: &str, documents: &[S]) -> Result<()> {
        let data = encode_documents(key, documents)?;
        self.put_entry(source, key, data)
    }

    /// Remove a source entirely; later fetches report it as not found
    pub fn remove_source(&self, source: &SourceRef) -> Result<bool> {
        Ok(self
            .sources
            .write()
            .map_err(|_| lock_poisoned("remove_source"))?
            .remove(source)
            .is_some())
    }
}

impl PayloadFetcher for MemoryPayloadStore {
    fn fetch_declaration(&self, reference: &DeclarationRef, cancel: &CancelToken) -> Result<Declaration> {
        cancel.check("fetch_declaration")?;
        self.declarations
            .read()
            .map_err(|_| lock_poisoned("fetch_declaration"))?
            .get(reference)
            .cloned()
            .ok_or_else(|| declaration_not_found(reference))
    }

    fn fetch_source(&self, source: &SourceRef, cancel: &CancelToken) -> Result<Vec<PayloadSource>> {
        cancel.check("fetch_source")?;
        let sources = self.sources.read().map_err(|_| lock_poisoned("fetch_source"))?;
        let entries = sources.get(source).ok_or_else(|| source_not_found(source))?;
        Ok(entries
            .iter()
            .map(|(key, data)| PayloadSource::new(source.clone(), key.clone(), data.clone()))
            .collect())
    }
}
