//! mrcheck Store - payload storage behind the `PayloadFetcher` seam
//!
//! Provides:
//! - Filesystem payload store with atomic writes
//! - In-memory payload store for tests and embedding
//! - Declaration YAML format and validating parser

pub mod declaration;
pub mod errors;
pub mod fs;
pub mod memory;
pub mod payload;

// Re-export key types
pub use declaration::{parse_declaration_file, parse_declaration_str, DeclarationDocument};
pub use errors::Result;
pub use fs::FsPayloadStore;
pub use memory::MemoryPayloadStore;
