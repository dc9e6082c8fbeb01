//! Domain model: identities, structured objects, object sets and payloads

pub mod identity;
pub mod object;
pub mod object_set;
pub mod payload;

pub use identity::{GroupVersionKind, ObjectIdentity};
pub use object::{ObjectMeta, StructuredObject};
pub use object_set::ObjectSet;
pub use payload::{Declaration, DeclarationRef, PayloadSource, SourceRef};
