//! Path layout and name validation
//!
//! Every name becomes exactly one path segment, so names that could escape
//! the store root or nest directories are rejected.

use crate::errors::{invalid_segment, Result};
use std::path::{Path, PathBuf};

pub const DECLARATIONS_DIR: &str = "declarations";
pub const SOURCES_DIR: &str = "sources";
pub const DECLARATION_EXTENSION: &str = "yaml";

/// Suffix of in-flight temp files; never a valid data key
pub const TEMP_SUFFIX: &str = ".mrcheck-tmp";

/// Check that `segment` is usable as a single path component
pub fn validate_segment(segment: &str) -> Result<()> {
    let reason = if segment.is_empty() {
        "must not be empty"
    } else if segment == "." || segment == ".." {
        "must not be a relative path component"
    } else if segment.contains(['/', '\\']) {
        "must not contain path separators"
    } else if segment.contains('\0') {
        "must not contain NUL"
    } else if segment.ends_with(TEMP_SUFFIX) {
        "must not use the reserved temp suffix"
    } else {
        return Ok(());
    };
    Err(invalid_segment(segment, reason))
}

/// `<root>/<namespace>/declarations/<name>.yaml`
pub fn declaration_path(root: &Path, namespace: &str, name: &str) -> Result<PathBuf> {
    validate_segment(namespace)?;
    validate_segment(name)?;
    Ok(root
        .join(namespace)
        .join(DECLARATIONS_DIR)
        .join(format!("{}.{}", name, DECLARATION_EXTENSION)))
}

/// `<root>/<namespace>/sources/<source>`
pub fn source_dir(root: &Path, namespace: &str, source: &str) -> Result<PathBuf> {
    validate_segment(namespace)?;
    validate_segment(source)?;
    Ok(root.join(namespace).join(SOURCES_DIR).join(source))
}

/// `<root>/<namespace>/sources/<source>/<key>`
pub fn entry_path(root: &Path, namespace: &str, source: &str, key: &str) -> Result<PathBuf> {
    validate_segment(key)?;
    Ok(source_dir(root, namespace, source)?.join(key))
}
