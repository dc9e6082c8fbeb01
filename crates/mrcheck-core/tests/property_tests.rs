#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Property tests for the codec and the diff engine

use mrcheck_core::codec::{compress, decompress, split_documents};
use mrcheck_core::diff::{compute_diff, find_mismatches, DiffOptions};
use mrcheck_core::{ObjectSet, StructuredObject};
use proptest::prelude::*;
use serde_json::json;

fn arb_object() -> impl Strategy<Value = StructuredObject> {
    (
        prop::sample::select(vec!["Service", "ConfigMap", "Secret"]),
        prop::sample::select(vec!["", "default", "kube-system"]),
        "[a-z][a-z0-9-]{0,8}",
        0u16..4,
    )
        .prop_map(|(kind, namespace, name, port)| {
            StructuredObject::from_value(json!({
                "apiVersion": "v1",
                "kind": kind,
                "metadata": {"name": name, "namespace": namespace},
                "spec": {"port": port}
            }))
            .unwrap()
        })
}

fn arb_set() -> impl Strategy<Value = ObjectSet> {
    prop::collection::vec(arb_object(), 0..12).prop_map(|objects| objects.into_iter().collect())
}

proptest! {
    #[test]
    fn prop_diff_of_set_with_itself_is_empty(set in arb_set(), check_extra in any::<bool>()) {
        let result = compute_diff(&set, &set, DiffOptions { check_extra });
        prop_assert!(result.is_success());
    }

    #[test]
    fn prop_mismatches_only_name_expected_identities(available in arb_set(), expected in arb_set()) {
        for mismatch in find_mismatches(&available, &expected) {
            prop_assert!(expected.contains(&mismatch.identity));
            prop_assert!(available.contains(&mismatch.identity));
        }
    }

    #[test]
    fn prop_at_most_one_stage_reports(available in arb_set(), expected in arb_set()) {
        let result = compute_diff(&available, &expected, DiffOptions { check_extra: true });
        let non_empty = [
            !result.mismatches.is_empty(),
            !result.missing.is_empty(),
            !result.extra.is_empty(),
        ];
        prop_assert!(non_empty.iter().filter(|b| **b).count() <= 1);
    }

    #[test]
    fn prop_compress_roundtrip(data in prop::collection::vec(any::<u8>(), 0..2048)) {
        let packed = compress(&data).unwrap();
        let unpacked = decompress("payload.br", &packed).unwrap();
        prop_assert_eq!(&*unpacked, data.as_slice());
    }

    #[test]
    fn prop_leading_separator_is_ignored(docs in prop::collection::vec("[a-z]{1,8}: [0-9]{1,3}\n", 0..5)) {
        let text = docs.join("---\n");
        let with_prefix = format!("---\n{}", text);
        let plain: Vec<&str> = split_documents(&text).collect();
        let prefixed: Vec<&str> = split_documents(&with_prefix).collect();
        prop_assert_eq!(plain, prefixed);
    }
}
