//! Filesystem-backed payload store
//!
//! Implements [`PayloadFetcher`] over the directory layout described in
//! [`crate::fs`], plus writers used to seed a store.

use crate::declaration::{parse_declaration_file, DeclarationDocument};
use crate::errors::{
    declaration_not_found, declaration_validation, invalid_data_key, io_error, serialization_error, source_not_found, Result,
};
use crate::fs::atomic::atomic_write;
use crate::fs::layout::{declaration_path, entry_path, source_dir, TEMP_SUFFIX};
use crate::payload::encode_documents;
use mrcheck_core::{CancelToken, Declaration, DeclarationRef, PayloadFetcher, PayloadSource, SourceRef};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Payload store rooted at a directory
#[derive(Debug, Clone)]
pub struct FsPayloadStore {
    root: PathBuf,
}

impl FsPayloadStore {
    /// Create a store at the given root directory
    ///
    /// The directory is created lazily by the first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write a declaration file, replacing any previous one
    pub fn put_declaration(&self, declaration: &Declaration) -> Result<PathBuf> {
        let document = DeclarationDocument::from(declaration);
        self.put_declaration_document(&document)
    }

    pub fn put_declaration_document(&self, document: &DeclarationDocument) -> Result<PathBuf> {
        let path = declaration_path(&self.root, &document.metadata.namespace, &document.metadata.name)?;
        let yaml = serde_yaml::to_string(document).map_err(|e| serialization_error("put_declaration", e))?;
        atomic_write(&path, yaml.as_bytes())?;
        tracing::debug!(path = %path.display(), "wrote declaration");
        Ok(path)
    }

    /// Write raw bytes under one data key of a source
    pub fn put_entry(&self, source: &SourceRef, key: &str, data: &[u8]) -> Result<PathBuf> {
        let path = entry_path(&self.root, &source.namespace, &source.name, key)?;
        atomic_write(&path, data)?;
        tracing::debug!(source = %source, data_key = key, bytes = data.len(), "wrote payload entry");
        Ok(path)
    }

    /// Write manifests as one multi-document payload
    ///
    /// The payload is Brotli-compressed when `key` carries the compression
    /// suffix.
    pub fn put_objects<S: AsRef<str>>(&self, source: &SourceRef, key: &str, documents: &[S]) -> Result<PathBuf> {
        let data = encode_documents(key, documents)?;
        self.put_entry(source, key, &data)
    }
}

impl PayloadFetcher for FsPayloadStore {
    fn fetch_declaration(&self, reference: &DeclarationRef, cancel: &CancelToken) -> Result<Declaration> {
        cancel.check("fetch_declaration")?;
        let path = declaration_path(&self.root, &reference.namespace, &reference.name)?;
        if !path.is_file() {
            return Err(declaration_not_found(reference));
        }

        let document = parse_declaration_file(&path)?;
        if document.reference() != *reference {
            return Err(declaration_validation(&format!(
                "declaration file {} describes {}",
                path.display(),
                document.reference()
            )));
        }
        Ok(document.to_declaration())
    }

    fn fetch_source(&self, source: &SourceRef, cancel: &CancelToken) -> Result<Vec<PayloadSource>> {
        cancel.check("fetch_source")?;
        let dir = source_dir(&self.root, &source.namespace, &source.name)?;
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(source_not_found(source)),
            Err(e) => return Err(io_error("read_source_dir", e).with_source_ref(source.to_string())),
        };

        let mut keys = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| io_error("read_source_dir", e))?;
            if !entry.file_type().map_err(|e| io_error("read_source_dir", e))?.is_file() {
                continue;
            }
            let name = entry.file_name();
            let key = name.to_str().ok_or_else(|| invalid_data_key(source, &name))?;
            if !key.ends_with(TEMP_SUFFIX) {
                keys.push(key.to_string());
            }
        }
        keys.sort();

        let mut payloads = Vec::with_capacity(keys.len());
        for key in keys {
            cancel.check("fetch_source")?;
            let data = fs::read(dir.join(&key)).map_err(|e| {
                io_error("read_payload_entry", e)
                    .with_source_ref(source.to_string())
                    .with_data_key(key.as_str())
            })?;
            payloads.push(PayloadSource::new(source.clone(), key, data));
        }
        Ok(payloads)
    }
}
