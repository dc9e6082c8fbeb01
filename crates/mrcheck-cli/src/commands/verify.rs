//! Verify command
//!
//! Usage: mrcheck verify --namespace <NS> --name <NAME> --expected <FILE>...

use crate::config::{FileConfig, Overrides, Settings};
use clap::Args;
use mrcheck_core::logging_facility;
use mrcheck_core::{
    CancelToken, DeclarationRef, ObjectSet, ObjectsMatcher, TypeRegistry, VerificationOutcome, VerifyOptions,
};
use mrcheck_store::FsPayloadStore;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct VerifyArgs {
    /// Namespace of the declaration
    #[arg(long)]
    pub namespace: String,

    /// Name of the declaration
    #[arg(long)]
    pub name: String,

    /// Manifest files holding the expected objects
    #[arg(long, required = true, num_args = 1..)]
    pub expected: Vec<PathBuf>,

    /// Store root directory
    #[arg(long)]
    pub store: Option<PathBuf>,

    /// Also fail on objects that were not expected
    #[arg(long)]
    pub check_extra: bool,

    /// Abort verification after this many seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Succeed only when the objects do not match
    #[arg(long)]
    pub negate: bool,

    /// Configuration file (defaults to ./mrcheck.toml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Execute verify; `Ok(false)` means the check ran and did not pass
pub fn execute(args: VerifyArgs) -> Result<bool, Box<dyn std::error::Error>> {
    let file = FileConfig::load(args.config.as_deref())?;
    let settings = Settings::resolve(
        file,
        Overrides {
            store_root: args.store.clone(),
            check_extra: args.check_extra,
            timeout_secs: args.timeout_secs,
        },
    );
    logging_facility::init(settings.log_profile);

    let registry = TypeRegistry::with_core_kinds();
    let expected = load_expected(&registry, &args.expected)?;

    let options = VerifyOptions::default()
        .with_check_extra(settings.check_extra)
        .with_collision_policy(settings.collision_policy);
    let cancel = match settings.timeout {
        Some(timeout) => CancelToken::new().with_timeout(timeout),
        None => CancelToken::new(),
    };

    let store = FsPayloadStore::new(&settings.store_root);
    let matcher = ObjectsMatcher::new(store, registry, expected, options);
    let outcome = matcher.verify(&DeclarationRef::new(args.namespace, args.name), &cancel)?;

    let passed = outcome.is_success() != args.negate;
    if passed && args.negate {
        println!(
            "✓ Declaration {} does not match the expected objects",
            outcome.declaration
        );
    } else {
        print!("{}", report(&outcome, args.negate));
    }
    Ok(passed)
}

fn report(outcome: &VerificationOutcome, negate: bool) -> String {
    if negate {
        outcome.negated_failure_message()
    } else {
        outcome.failure_message()
    }
}

/// Decode every expected manifest file into one set
fn load_expected(registry: &TypeRegistry, paths: &[PathBuf]) -> Result<ObjectSet, Box<dyn std::error::Error>> {
    let mut expected = ObjectSet::new();
    for path in paths {
        let objects = read_manifests(registry, path)?;
        tracing::debug!(path = %path.display(), object_count = objects.len(), "loaded expected manifests");
        expected.extend(objects.into_iter().map(|(_, object)| object));
    }
    Ok(expected)
}

fn read_manifests(registry: &TypeRegistry, path: &Path) -> Result<ObjectSet, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(path).map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
    let objects = ObjectSet::from_yaml(registry, &text)
        .map_err(|e| format!("invalid manifests in {}: {}", path.display(), e))?;
    Ok(objects)
}
