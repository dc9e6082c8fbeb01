#![allow(clippy::unwrap_used, clippy::expect_used)]

// End-to-end verification against stores seeded through their writers

use mrcheck_core::errors::ExErrorKind;
use mrcheck_core::{
    CancelToken, DeclarationRef, DiffStage, ObjectSet, ObjectsMatcher, PayloadFetcher, SourceRef, TypeRegistry,
    VerifyOptions,
};
use mrcheck_store::{parse_declaration_file, FsPayloadStore, MemoryPayloadStore};
use std::path::PathBuf;
use tempfile::TempDir;

const DEPLOYMENT: &str = "apiVersion: apps/v1
kind: Deployment
metadata:
  name: web
  namespace: shoot--dev
spec:
  replicas: 2
  template:
    spec:
      containers:
      - name: web
        image: nginx
        resources:
          limits:
            memory: 1Gi
";

const ROLE: &str = "apiVersion: rbac.authorization.k8s.io/v1
kind: ClusterRole
metadata:
  name: reader
rules:
- apiGroups: ['']
  resources: [pods]
  verbs: [get, list]
";

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

fn seed_fs_store() -> (FsPayloadStore, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let store = FsPayloadStore::new(temp_dir.path());

    let document = parse_declaration_file(&fixtures_dir().join("declaration.yaml")).unwrap();
    store.put_declaration_document(&document).unwrap();
    store
        .put_objects(
            &SourceRef::new("shoot--dev", "managedresource-objects"),
            "objects.yaml.br",
            &[DEPLOYMENT],
        )
        .unwrap();
    store
        .put_objects(
            &SourceRef::new("shoot--dev", "managedresource-rbac"),
            "rbac.yaml",
            &[ROLE],
        )
        .unwrap();
    (store, temp_dir)
}

fn expected(docs: &[&str]) -> ObjectSet {
    ObjectSet::from_yaml(&TypeRegistry::with_core_kinds(), &docs.join("---\n")).unwrap()
}

fn reference() -> DeclarationRef {
    DeclarationRef::new("shoot--dev", "extension-objects")
}

#[test]
fn test_fs_store_matches_seeded_objects() {
    let (store, _dir) = seed_fs_store();
    let matcher = ObjectsMatcher::new(
        store,
        TypeRegistry::with_core_kinds(),
        expected(&[DEPLOYMENT, ROLE]),
        VerifyOptions::default().with_check_extra(true),
    );

    let outcome = matcher.verify(&reference(), &CancelToken::new()).unwrap();
    outcome.assert_matched();
    assert_eq!(outcome.available_count, 2);
}

#[test]
fn test_quantity_representation_does_not_mismatch() {
    let (store, _dir) = seed_fs_store();
    let respelled = DEPLOYMENT.replace("memory: 1Gi", "memory: 1024Mi");
    let matcher = ObjectsMatcher::new(
        store,
        TypeRegistry::with_core_kinds(),
        expected(&[&respelled, ROLE]),
        VerifyOptions::default(),
    );

    let outcome = matcher.verify(&reference(), &CancelToken::new()).unwrap();
    outcome.assert_matched();
}

#[test]
fn test_fs_store_reports_missing_role() {
    let (store, _dir) = seed_fs_store();
    let extra_role = ROLE.replace("name: reader", "name: writer");
    let matcher = ObjectsMatcher::new(
        store,
        TypeRegistry::with_core_kinds(),
        expected(&[DEPLOYMENT, ROLE, &extra_role]),
        VerifyOptions::default(),
    );

    let outcome = matcher.verify(&reference(), &CancelToken::new()).unwrap();
    assert_eq!(outcome.diff.failed_stage(), Some(DiffStage::Missing));
    assert_eq!(
        outcome.diff.missing_keys(),
        vec!["rbac.authorization.k8s.io/v1, Kind=ClusterRole____writer"]
    );
}

#[test]
fn test_corrupted_file_on_disk_is_decode_error() {
    let (store, dir) = seed_fs_store();
    let path = dir
        .path()
        .join("shoot--dev/sources/managedresource-objects/objects.yaml.br");
    let bytes = std::fs::read(&path).unwrap();
    std::fs::write(&path, &bytes[..bytes.len() / 2]).unwrap();

    let matcher = ObjectsMatcher::new(
        store,
        TypeRegistry::with_core_kinds(),
        expected(&[DEPLOYMENT, ROLE]),
        VerifyOptions::default(),
    );
    let err = matcher.verify(&reference(), &CancelToken::new()).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::CorruptPayload);
    assert_eq!(err.source_ref(), Some("shoot--dev/managedresource-objects"));
}

#[test]
fn test_deleted_source_is_not_found() {
    let (store, dir) = seed_fs_store();
    std::fs::remove_dir_all(dir.path().join("shoot--dev/sources/managedresource-rbac")).unwrap();

    let err = store
        .fetch_source(
            &SourceRef::new("shoot--dev", "managedresource-rbac"),
            &CancelToken::new(),
        )
        .unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_memory_store_behaves_like_fs_store() {
    let (fs_store, _dir) = seed_fs_store();
    let memory = MemoryPayloadStore::new();
    let cancel = CancelToken::new();

    let declaration = fs_store.fetch_declaration(&reference(), &cancel).unwrap();
    for source in &declaration.source_refs {
        for entry in fs_store.fetch_source(source, &cancel).unwrap() {
            memory
                .put_entry(source, &entry.key, entry.data.expose().clone())
                .unwrap();
        }
    }
    memory.put_declaration(declaration.clone()).unwrap();

    let from_fs = ObjectsMatcher::new(
        &fs_store,
        TypeRegistry::with_core_kinds(),
        expected(&[DEPLOYMENT]),
        VerifyOptions::default().with_check_extra(true),
    )
    .verify(&reference(), &cancel)
    .unwrap();
    let from_memory = ObjectsMatcher::new(
        &memory,
        TypeRegistry::with_core_kinds(),
        expected(&[DEPLOYMENT]),
        VerifyOptions::default().with_check_extra(true),
    )
    .verify(&reference(), &cancel)
    .unwrap();

    assert_eq!(from_fs, from_memory);
    assert_eq!(from_fs.diff.failed_stage(), Some(DiffStage::Extra));
}
