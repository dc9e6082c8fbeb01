//! mrcheck Core - managed object set verification
//!
//! This crate checks that the objects declared by a stored declaration match
//! an expected set:
//! - Payload decoding: Brotli decompression, multi-document splitting and
//!   registry-driven typed decoding
//! - Object sets keyed by canonical identity
//! - Priority-ordered diffing (mismatch, missing, extra) with semantic
//!   equality
//! - Diagnostics suitable for test assertions
//!
//! Storage is reached only through the [`PayloadFetcher`] trait.

pub mod builder;
pub mod codec;
pub mod diff;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod verify;

// Re-export commonly used types
pub use builder::{CollisionPolicy, ObjectSetBuilder};
pub use codec::{KindDecoder, KindShape, ObjectDecoder, TypeRegistry};
pub use diff::{compute_diff, DiffOptions, DiffResult, DiffStage, ObjectMismatch};
pub use errors::{ExError, ExErrorKind, Result, VerifyError};
pub use model::{
    Declaration, DeclarationRef, GroupVersionKind, ObjectIdentity, ObjectSet, PayloadSource, SourceRef,
    StructuredObject,
};
pub use verify::{CancelToken, ObjectsMatcher, PayloadFetcher, VerificationOutcome, VerifyOptions};
