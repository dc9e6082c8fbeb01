//! Declaration parser with validation
//!
//! Parses YAML and validates names and source reference uniqueness

use crate::errors::{declaration_validation, io_error, Result};
use crate::declaration::format::DeclarationDocument;
use crate::fs::layout::validate_segment;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Parse a declaration file from a path
pub fn parse_declaration_file(path: &Path) -> Result<DeclarationDocument> {
    let content = fs::read_to_string(path).map_err(|e| io_error("read_declaration", e))?;
    parse_declaration_str(&content)
}

/// Parse a declaration from a string
pub fn parse_declaration_str(content: &str) -> Result<DeclarationDocument> {
    let document: DeclarationDocument = serde_yaml::from_str(content)
        .map_err(|e| declaration_validation(&format!("YAML parse error: {}", e)))?;

    validate_declaration(&document)?;

    Ok(document)
}

/// Validate a parsed declaration
fn validate_declaration(document: &DeclarationDocument) -> Result<()> {
    if document.metadata.name.is_empty() {
        return Err(declaration_validation("metadata.name must not be empty"));
    }
    if document.metadata.namespace.is_empty() {
        return Err(declaration_validation("metadata.namespace must not be empty"));
    }
    validate_segment(&document.metadata.name)?;
    validate_segment(&document.metadata.namespace)?;

    let mut seen = HashSet::new();
    for secret_ref in &document.spec.secret_refs {
        if secret_ref.name.is_empty() {
            return Err(declaration_validation("spec.secretRefs[].name must not be empty"));
        }
        validate_segment(&secret_ref.name)?;
        if !seen.insert(secret_ref.name.as_str()) {
            return Err(declaration_validation(&format!(
                "Duplicate secretRef {} in declaration {}/{}",
                secret_ref.name, document.metadata.namespace, document.metadata.name
            )));
        }
    }

    Ok(())
}
