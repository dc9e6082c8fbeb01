//! Declaration documents: the stored records naming a set of payload sources

pub mod format;
pub mod parser;

pub use format::{DeclarationDocument, DeclarationMetadata, DeclarationSpec, SecretRef};
pub use parser::{parse_declaration_file, parse_declaration_str};
