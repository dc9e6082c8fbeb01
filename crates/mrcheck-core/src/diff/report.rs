//! Diagnostic rendering for verification outcomes.

use crate::diff::model::DiffStage;
use crate::verify::VerificationOutcome;

const ITEM_INDENT: usize = 2;
const OBJECT_INDENT: usize = 4;

/// Render the diagnostic for an outcome
///
/// Exactly one shape is produced, chosen by the stage that failed. `negate`
/// selects the phrasing used when the caller expected the sets *not* to
/// match ("to be" instead of "not to be").
pub fn render(outcome: &VerificationOutcome, negate: bool) -> String {
    let addition = if negate { "to be" } else { "not to be" };
    let declaration = &outcome.declaration;
    let diff = &outcome.diff;

    let Some(stage) = diff.failed_stage() else {
        return format!(
            "All {} expected objects matched for declaration {} ({} available)\n",
            outcome.expected_count, declaration, outcome.available_count
        );
    };

    let mut out = String::new();
    match stage {
        DiffStage::Mismatch => {
            out.push_str(&format!(
                "Expected for declaration {} the following object mismatches {} found:\n",
                declaration, addition
            ));
            for mismatch in &diff.mismatches {
                out.push_str("Expected\n");
                out.push_str(&indent(&mismatch.actual.to_yaml(), OBJECT_INDENT));
                out.push_str("to equal\n");
                out.push_str(&indent(&mismatch.expected.to_yaml(), OBJECT_INDENT));
            }
        }
        DiffStage::Missing => {
            out.push_str(&format!(
                "Expected for declaration {} the following elements {} absent:\n",
                declaration, addition
            ));
            for key in diff.missing_keys() {
                out.push_str(&indent(&key, ITEM_INDENT));
            }
        }
        DiffStage::Extra => {
            out.push_str(&format!(
                "Expected for declaration {} the following extra and unexpected elements {} found:\n",
                declaration, addition
            ));
            for key in diff.extra_keys() {
                out.push_str(&indent(&key, ITEM_INDENT));
            }
        }
    }
    out
}

/// Indent every line of `text` and terminate it with a newline
fn indent(text: &str, width: usize) -> String {
    let pad = " ".repeat(width);
    text.lines().map(|line| format!("{}{}\n", pad, line)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::model::{DiffResult, ObjectMismatch};
    use crate::model::{DeclarationRef, GroupVersionKind, ObjectIdentity, StructuredObject};
    use serde_json::json;

    fn outcome(diff: DiffResult) -> VerificationOutcome {
        VerificationOutcome {
            declaration: DeclarationRef::new("shoot--dev", "objects"),
            available_count: 1,
            expected_count: 1,
            diff,
        }
    }

    fn id(name: &str) -> ObjectIdentity {
        ObjectIdentity::new(GroupVersionKind::new("", "v1", "Service"), "ns", name)
    }

    fn service(port: u16) -> StructuredObject {
        StructuredObject::from_value(json!({
            "apiVersion": "v1",
            "kind": "Service",
            "metadata": {"name": "a", "namespace": "ns"},
            "spec": {"ports": [{"port": port}]}
        }))
        .unwrap()
    }

    #[test]
    fn test_missing_shape() {
        let out = outcome(DiffResult {
            missing: [id("a"), id("b")].into_iter().collect(),
            ..Default::default()
        });
        assert_eq!(
            render(&out, false),
            "Expected for declaration shoot--dev/objects the following elements not to be absent:\n  \
             /v1, Kind=Service__ns__a\n  /v1, Kind=Service__ns__b\n"
        );
    }

    #[test]
    fn test_negate_flips_phrasing() {
        let out = outcome(DiffResult {
            extra: [id("x")].into_iter().collect(),
            ..Default::default()
        });
        let text = render(&out, true);
        assert!(text.starts_with(
            "Expected for declaration shoot--dev/objects the following extra and unexpected elements to be found:\n"
        ));
        assert!(text.ends_with("  /v1, Kind=Service__ns__x\n"));
    }

    #[test]
    fn test_mismatch_shape_shows_both_objects() {
        let out = outcome(DiffResult {
            mismatches: vec![ObjectMismatch {
                identity: id("a"),
                expected: service(81),
                actual: service(80),
            }],
            ..Default::default()
        });
        let text = render(&out, false);
        assert!(text.starts_with(
            "Expected for declaration shoot--dev/objects the following object mismatches not to be found:\nExpected\n"
        ));
        let actual_at = text.find("port: 80").unwrap();
        let equal_at = text.find("to equal").unwrap();
        let expected_at = text.find("port: 81").unwrap();
        assert!(actual_at < equal_at && equal_at < expected_at);
        assert!(text.contains("\n    kind: Service\n"));
    }

    #[test]
    fn test_success_line() {
        let text = render(&outcome(DiffResult::default()), false);
        assert_eq!(
            text,
            "All 1 expected objects matched for declaration shoot--dev/objects (1 available)\n"
        );
    }
}
