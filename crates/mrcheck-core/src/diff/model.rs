//! Diff output types.
//!
//! Identity collections are `BTreeSet`s and mismatches are sorted by
//! identity, so rendering is deterministic.

use crate::model::{ObjectIdentity, StructuredObject};
use std::collections::BTreeSet;
use std::fmt;

/// Comparison stages, in evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiffStage {
    Mismatch,
    Missing,
    Extra,
}

impl DiffStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiffStage::Mismatch => "mismatch",
            DiffStage::Missing => "missing",
            DiffStage::Extra => "extra",
        }
    }
}

impl fmt::Display for DiffStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller-controlled comparison options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DiffOptions {
    /// Report available objects that were not expected. Off by default.
    pub check_extra: bool,
}

/// One identity present on both sides whose contents differ
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectMismatch {
    pub identity: ObjectIdentity,
    pub expected: StructuredObject,
    pub actual: StructuredObject,
}

/// Outcome of comparing an available set against an expected set
///
/// At most one collection is non-empty: evaluation stops at the first stage
/// that finds something.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiffResult {
    pub mismatches: Vec<ObjectMismatch>,
    pub missing: BTreeSet<ObjectIdentity>,
    pub extra: BTreeSet<ObjectIdentity>,
}

impl DiffResult {
    /// The stage that failed, if any
    pub fn failed_stage(&self) -> Option<DiffStage> {
        if !self.mismatches.is_empty() {
            Some(DiffStage::Mismatch)
        } else if !self.missing.is_empty() {
            Some(DiffStage::Missing)
        } else if !self.extra.is_empty() {
            Some(DiffStage::Extra)
        } else {
            None
        }
    }

    pub fn is_success(&self) -> bool {
        self.failed_stage().is_none()
    }

    /// Missing identities rendered as keys
    pub fn missing_keys(&self) -> Vec<String> {
        self.missing.iter().map(ToString::to_string).collect()
    }

    /// Extra identities rendered as keys
    pub fn extra_keys(&self) -> Vec<String> {
        self.extra.iter().map(ToString::to_string).collect()
    }
}
