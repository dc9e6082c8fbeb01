//! Store commands
//!
//! Usage:
//!   mrcheck store put-declaration <FILE>
//!   mrcheck store put-objects --namespace <NS> --source <NAME> --key <KEY> --file <FILE>...

use crate::config::{FileConfig, Overrides, Settings};
use clap::{Args, Subcommand};
use mrcheck_core::logging_facility;
use mrcheck_core::SourceRef;
use mrcheck_store::{parse_declaration_file, FsPayloadStore};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct StoreArgs {
    /// Store root directory
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// Configuration file (defaults to ./mrcheck.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: StoreCommand,
}

#[derive(Debug, Subcommand)]
pub enum StoreCommand {
    /// Validate a declaration file and write it to the store
    PutDeclaration(PutDeclarationArgs),
    /// Write manifests as one payload entry of a source
    PutObjects(PutObjectsArgs),
}

#[derive(Debug, Args)]
pub struct PutDeclarationArgs {
    /// Path to the declaration YAML file
    pub file: PathBuf,
}

#[derive(Debug, Args)]
pub struct PutObjectsArgs {
    /// Namespace of the source
    #[arg(long)]
    pub namespace: String,

    /// Name of the source
    #[arg(long)]
    pub source: String,

    /// Data key; a `.br` suffix stores the payload compressed
    #[arg(long)]
    pub key: String,

    /// Manifest files, concatenated in order
    #[arg(long, required = true, num_args = 1..)]
    pub file: Vec<PathBuf>,
}

/// Execute store command
pub fn execute(args: StoreArgs) -> Result<(), Box<dyn std::error::Error>> {
    let file = FileConfig::load(args.config.as_deref())?;
    let settings = Settings::resolve(
        file,
        Overrides {
            store_root: args.store,
            ..Overrides::default()
        },
    );
    logging_facility::init(settings.log_profile);

    let store = FsPayloadStore::new(&settings.store_root);
    match args.command {
        StoreCommand::PutDeclaration(put_args) => put_declaration(&store, put_args),
        StoreCommand::PutObjects(put_args) => put_objects(&store, put_args),
    }
}

fn put_declaration(store: &FsPayloadStore, args: PutDeclarationArgs) -> Result<(), Box<dyn std::error::Error>> {
    let document = parse_declaration_file(&args.file)?;
    let path = store.put_declaration_document(&document)?;
    println!(
        "✓ Stored declaration {} ({} sources) at {}",
        document.reference(),
        document.spec.secret_refs.len(),
        path.display()
    );
    Ok(())
}

fn put_objects(store: &FsPayloadStore, args: PutObjectsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut documents = Vec::with_capacity(args.file.len());
    for path in &args.file {
        let text = std::fs::read_to_string(path).map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
        documents.push(text);
    }

    let source = SourceRef::new(args.namespace, args.source);
    let path = store.put_objects(&source, &args.key, &documents)?;
    println!("✓ Stored {} under {} at {}", args.key, source, path.display());
    Ok(())
}
