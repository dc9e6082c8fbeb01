//! CLI integration tests
//!
//! Drive the built binary against a store seeded through `store` commands.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

const DECLARATION: &str = "apiVersion: resources.gardener.cloud/v1alpha1
kind: ManagedResource
metadata:
  name: objects
  namespace: shoot--dev
spec:
  secretRefs:
  - name: objects-secret
";

const SERVICE: &str = "apiVersion: v1
kind: Service
metadata:
  name: web
  namespace: shoot--dev
spec:
  ports:
  - port: 80
";

const CONFIG_MAP: &str = "apiVersion: v1
kind: ConfigMap
metadata:
  name: settings
  namespace: shoot--dev
data:
  mode: strict
";

fn run(cwd: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_mrcheck-cli"))
        .current_dir(cwd)
        .env("RUST_LOG", "off")
        .args(args)
        .output()
        .expect("Failed to execute CLI")
}

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

/// Seed a store under `<temp>/store` holding SERVICE and CONFIG_MAP
fn seed_store(temp_dir: &TempDir) -> PathBuf {
    let store = temp_dir.path().join("store");
    let declaration = write(temp_dir.path(), "declaration.yaml", DECLARATION);
    let service = write(temp_dir.path(), "service.yaml", SERVICE);
    let config_map = write(temp_dir.path(), "config_map.yaml", CONFIG_MAP);

    let output = run(
        temp_dir.path(),
        &["store", "put-declaration", declaration.to_str().unwrap(), "--store", store.to_str().unwrap()],
    );
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let output = run(
        temp_dir.path(),
        &[
            "store",
            "put-objects",
            "--namespace",
            "shoot--dev",
            "--source",
            "objects-secret",
            "--key",
            "objects.yaml.br",
            "--file",
            service.to_str().unwrap(),
            config_map.to_str().unwrap(),
            "--store",
            store.to_str().unwrap(),
        ],
    );
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    store
}

fn verify(temp_dir: &TempDir, store: &Path, expected: &Path, extra: &[&str]) -> Output {
    let mut args = vec![
        "verify",
        "--namespace",
        "shoot--dev",
        "--name",
        "objects",
        "--store",
        store.to_str().unwrap(),
        "--expected",
        expected.to_str().unwrap(),
    ];
    args.extend_from_slice(extra);
    run(temp_dir.path(), &args)
}

#[test]
fn test_cli_store_writes_compressed_entry() {
    let temp_dir = TempDir::new().unwrap();
    let store = seed_store(&temp_dir);

    let entry = store.join("shoot--dev/sources/objects-secret/objects.yaml.br");
    let bytes = fs::read(&entry).unwrap();
    assert!(!bytes.is_empty());
    assert!(!String::from_utf8_lossy(&bytes).contains("kind: Service"));
}

#[test]
fn test_cli_verify_matching_exits_zero() {
    let temp_dir = TempDir::new().unwrap();
    let store = seed_store(&temp_dir);
    let expected = write(temp_dir.path(), "expected.yaml", &format!("{}---\n{}", SERVICE, CONFIG_MAP));

    let output = verify(&temp_dir, &store, &expected, &["--check-extra"]);
    assert_eq!(output.status.code(), Some(0), "stdout: {}", String::from_utf8_lossy(&output.stdout));
    assert!(String::from_utf8_lossy(&output.stdout).contains("All 2 expected objects matched"));
}

#[test]
fn test_cli_verify_mismatch_exits_one() {
    let temp_dir = TempDir::new().unwrap();
    let store = seed_store(&temp_dir);
    let expected = write(temp_dir.path(), "expected.yaml", &SERVICE.replace("port: 80", "port: 8080"));

    let output = verify(&temp_dir, &store, &expected, &[]);
    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("the following object mismatches not to be found"));
    assert!(stdout.contains("port: 8080"));
}

#[test]
fn test_cli_verify_extra_only_with_flag() {
    let temp_dir = TempDir::new().unwrap();
    let store = seed_store(&temp_dir);
    let expected = write(temp_dir.path(), "expected.yaml", SERVICE);

    let lenient = verify(&temp_dir, &store, &expected, &[]);
    assert_eq!(lenient.status.code(), Some(0));

    let strict = verify(&temp_dir, &store, &expected, &["--check-extra"]);
    assert_eq!(strict.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&strict.stdout).contains("v1, Kind=ConfigMap__shoot--dev__settings"));
}

#[test]
fn test_cli_verify_negate_inverts_exit_code() {
    let temp_dir = TempDir::new().unwrap();
    let store = seed_store(&temp_dir);
    let expected = write(temp_dir.path(), "expected.yaml", &SERVICE.replace("name: web", "name: api"));

    let output = verify(&temp_dir, &store, &expected, &["--negate"]);
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("does not match the expected objects"));
    assert!(!stdout.contains("to be absent"));
}

#[test]
fn test_cli_verify_negate_fails_when_objects_match() {
    let temp_dir = TempDir::new().unwrap();
    let store = seed_store(&temp_dir);
    let expected = write(temp_dir.path(), "expected.yaml", SERVICE);

    let output = verify(&temp_dir, &store, &expected, &["--negate"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stdout).contains("All 1 expected objects matched"));
}

#[test]
fn test_cli_verify_unknown_declaration_exits_two() {
    let temp_dir = TempDir::new().unwrap();
    let store = seed_store(&temp_dir);
    let expected = write(temp_dir.path(), "expected.yaml", SERVICE);

    let output = run(
        temp_dir.path(),
        &[
            "verify",
            "--namespace",
            "shoot--dev",
            "--name",
            "absent",
            "--store",
            store.to_str().unwrap(),
            "--expected",
            expected.to_str().unwrap(),
        ],
    );
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error:"));
}

#[test]
fn test_cli_reads_config_from_working_directory() {
    let temp_dir = TempDir::new().unwrap();
    let store = seed_store(&temp_dir);
    write(temp_dir.path(), "mrcheck.toml", "store_root = \"store\"\ncheck_extra = true\n");
    let expected = write(temp_dir.path(), "expected.yaml", SERVICE);

    // store_root and check_extra both come from the file
    let output = run(
        temp_dir.path(),
        &["verify", "--namespace", "shoot--dev", "--name", "objects", "--expected", expected.to_str().unwrap()],
    );
    assert_eq!(output.status.code(), Some(1));
    assert!(store.is_dir());
}

#[test]
fn test_cli_rejects_invalid_declaration_file() {
    let temp_dir = TempDir::new().unwrap();
    let declaration = write(
        temp_dir.path(),
        "declaration.yaml",
        "metadata:\n  name: objects\n  namespace: shoot--dev\nspec:\n  secretRefs:\n  - name: a\n  - name: a\n",
    );

    let output = run(temp_dir.path(), &["store", "put-declaration", declaration.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(2));
    assert!(!temp_dir.path().join(".mrcheck").exists());
}
