//! Priority-ordered set comparison.
//!
//! [`compute_diff`] evaluates three stages in a fixed order and stops at the
//! first one that finds anything:
//!
//! 1. mismatches: identities on both sides whose objects are not
//!    semantically equal
//! 2. missing: expected identities absent from the available set
//! 3. extra: available identities that were not expected (only when
//!    [`DiffOptions::check_extra`] is set)

use crate::diff::model::{DiffOptions, DiffResult, ObjectMismatch};
use crate::model::{ObjectIdentity, ObjectSet};
use std::collections::BTreeSet;

/// Compare `available` against `expected`
pub fn compute_diff(available: &ObjectSet, expected: &ObjectSet, options: DiffOptions) -> DiffResult {
    let mismatches = find_mismatches(available, expected);
    if !mismatches.is_empty() {
        tracing::debug!(stage = "mismatch", count = mismatches.len(), "diff stopped");
        return DiffResult {
            mismatches,
            ..Default::default()
        };
    }

    let missing = find_missing(available, expected);
    if !missing.is_empty() {
        tracing::debug!(stage = "missing", count = missing.len(), "diff stopped");
        return DiffResult {
            missing,
            ..Default::default()
        };
    }

    let extra = if options.check_extra {
        find_extra(available, expected)
    } else {
        BTreeSet::new()
    };
    DiffResult {
        extra,
        ..Default::default()
    }
}

/// Expected objects whose available counterpart differs
///
/// Only identities present on both sides are compared, in identity order.
pub fn find_mismatches(available: &ObjectSet, expected: &ObjectSet) -> Vec<ObjectMismatch> {
    expected
        .iter()
        .filter_map(|(identity, want)| {
            let got = available.get(identity)?;
            if got.semantic_eq(want) {
                None
            } else {
                Some(ObjectMismatch {
                    identity: identity.clone(),
                    expected: want.clone(),
                    actual: got.clone(),
                })
            }
        })
        .collect()
}

/// `expected - available`
pub fn find_missing(available: &ObjectSet, expected: &ObjectSet) -> BTreeSet<ObjectIdentity> {
    difference(expected, available)
}

/// `available - expected`
pub fn find_extra(available: &ObjectSet, expected: &ObjectSet) -> BTreeSet<ObjectIdentity> {
    difference(available, expected)
}

fn difference(left: &ObjectSet, right: &ObjectSet) -> BTreeSet<ObjectIdentity> {
    left.identities()
        .filter(|id| !right.contains(id))
        .cloned()
        .collect()
}
